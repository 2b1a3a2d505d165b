//! Agent module - the question-answering loop.
//!
//! The agent follows a "tools in a loop" pattern:
//! 1. Build context with system prompt and the user's question
//! 2. Call LLM with available tools
//! 3. If LLM requests a tool call, execute it and feed the result back
//! 4. Repeat until LLM produces a final answer or max iterations reached

mod agent_loop;
mod prompt;

pub use agent_loop::Agent;
pub use prompt::build_system_prompt;
