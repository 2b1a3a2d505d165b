//! # Ask Agent
//!
//! A minimal question-answering HTTP service backed by an LLM agent.
//!
//! This library provides:
//! - An HTTP API that accepts a natural-language question
//! - A tool-based agent loop that decides when to call a tool and when
//!   to answer
//! - Persistence of every answered question/answer pair
//!
//! ## Architecture
//!
//! The agent follows the "tools in a loop" pattern:
//! 1. Receive a question via the API
//! 2. Build context with system prompt and available tools
//! 3. Call LLM, parse response, execute any tool calls
//! 4. Feed results back to LLM, repeat until a final answer is produced
//!
//! ## Example
//!
//! ```rust,ignore
//! use ask_agent::{agent::Agent, config::Config};
//!
//! let config = Config::from_env()?;
//! let agent = Agent::from_config(&config);
//! let answer = agent.answer(Some("what time is it?")).await?;
//! ```

pub mod agent;
pub mod api;
pub mod config;
pub mod llm;
pub mod store;
pub mod tools;

pub use config::Config;
