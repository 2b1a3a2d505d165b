//! OpenAI Chat Completions client.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use super::{AssistantMessage, ChatMessage, LlmClient};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI chat completions endpoint.
///
/// Sampling temperature is pinned to zero; answers should be
/// deterministic for a given conversation.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests against a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        model: &str,
        messages: &[ChatMessage],
        tools: Option<&[Value]>,
    ) -> anyhow::Result<AssistantMessage> {
        let mut body = serde_json::json!({
            "model": model,
            "messages": messages,
            "temperature": 0,
        });

        if let Some(tools) = tools {
            if !tools.is_empty() {
                body["tools"] = Value::Array(tools.to_vec());
            }
        }

        tracing::debug!(model, message_count = messages.len(), "Calling chat completion");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Chat completion failed with status {}: {}", status, body);
        }

        let completion: CompletionResponse = response.json().await?;
        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| anyhow::anyhow!("Chat completion returned no choices"))?;

        Ok(choice.message)
    }
}
