//! API request and response types.

use serde::{Deserialize, Serialize};

/// Request to ask a question.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskRequest {
    /// The user's question. May be absent; it is forwarded to the
    /// agent unchanged either way.
    #[serde(default)]
    pub question: Option<String>,
}

/// Response carrying the agent's answer.
#[derive(Debug, Clone, Serialize)]
pub struct AskResponse {
    /// The original question, echoed back
    pub question: Option<String>,

    /// Final answer produced by the agent loop
    pub answer: String,
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Service version
    pub version: String,
}
