//! Configuration management for Ask Agent.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. Credential for the model provider.
//! - `VT_API_KEY` - Optional. VirusTotal API key. Without it the IP
//!   reputation tool reports itself as not configured.
//! - `DEFAULT_MODEL` - Optional. Model identifier. Defaults to `gpt-4.1-nano`.
//! - `DATABASE_PATH` - Optional. SQLite file for interaction records.
//!   Defaults to `interactions.db`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `3000`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations. Defaults to `10`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model provider API key
    pub openai_api_key: String,

    /// VirusTotal API key; absence degrades only the reputation tool
    pub vt_api_key: Option<String>,

    /// LLM model identifier
    pub model: String,

    /// SQLite database file for interaction records
    pub database_path: PathBuf,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop
    pub max_iterations: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let openai_api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let vt_api_key = std::env::var("VT_API_KEY").ok();

        let model =
            std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4.1-nano".to_string());

        let database_path = std::env::var("DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("interactions.db"));

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let max_iterations = std::env::var("MAX_ITERATIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("MAX_ITERATIONS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            openai_api_key,
            vt_api_key,
            model,
            database_path,
            host,
            port,
            max_iterations,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(openai_api_key: String, model: String) -> Self {
        Self {
            openai_api_key,
            vt_api_key: None,
            model,
            database_path: PathBuf::from("interactions.db"),
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_iterations: 10,
        }
    }
}
