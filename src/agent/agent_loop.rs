//! Core agent loop implementation.

use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ChatMessage, LlmClient, OpenAiClient, Role, ToolCall};
use crate::tools::ToolRegistry;

use super::prompt::build_system_prompt;

/// The question-answering agent.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    model: String,
    max_iterations: usize,
}

impl Agent {
    /// Create an agent from an LLM client and tool set.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: ToolRegistry,
        model: impl Into<String>,
        max_iterations: usize,
    ) -> Self {
        Self {
            llm,
            tools,
            model: model.into(),
            max_iterations,
        }
    }

    /// Create an agent with the production client and default tools.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Arc::new(OpenAiClient::new(config.openai_api_key.clone())),
            ToolRegistry::new(config.vt_api_key.clone()),
            &config.model,
            config.max_iterations,
        )
    }

    /// Answer a question and return the final response text.
    ///
    /// An absent question is forwarded to the model as-is; the provider
    /// rejects it and the error propagates to the caller.
    pub async fn answer(&self, question: Option<&str>) -> anyhow::Result<String> {
        let mut messages = vec![
            ChatMessage::system(build_system_prompt(&self.tools)),
            ChatMessage::user(question.map(|q| q.to_string())),
        ];

        // Get tool schemas for LLM
        let tool_schemas = self.tools.get_tool_schemas();

        // Agent loop
        for iteration in 0..self.max_iterations {
            tracing::debug!("Agent iteration {}", iteration + 1);

            // Call LLM
            let response = self
                .llm
                .chat_completion(&self.model, &messages, Some(tool_schemas.as_slice()))
                .await?;

            // Check for tool calls
            if let Some(tool_calls) = &response.tool_calls {
                if !tool_calls.is_empty() {
                    // Add assistant message with tool calls
                    messages.push(ChatMessage {
                        role: Role::Assistant,
                        content: response.content.clone(),
                        tool_calls: Some(tool_calls.clone()),
                        tool_call_id: None,
                    });

                    // Execute each tool call
                    for tool_call in tool_calls {
                        tracing::debug!(
                            "Calling tool: {} with args: {}",
                            tool_call.function.name,
                            tool_call.function.arguments
                        );

                        let result = self.execute_tool_call(tool_call).await;

                        let result_str = match result {
                            Ok(output) => output,
                            Err(e) => format!("Error: {}", e),
                        };

                        // Add tool result message
                        messages.push(ChatMessage::tool_result(&tool_call.id, result_str));
                    }

                    continue;
                }
            }

            // No tool calls - this is the final answer
            if let Some(content) = response.content {
                return Ok(content);
            }

            // Empty response - shouldn't happen but handle gracefully
            return Err(anyhow::anyhow!("LLM returned empty response"));
        }

        Err(anyhow::anyhow!(
            "Max iterations ({}) reached without an answer",
            self.max_iterations
        ))
    }

    /// Execute a single tool call.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> anyhow::Result<String> {
        let args: serde_json::Value = serde_json::from_str(&tool_call.function.arguments)
            .unwrap_or(serde_json::Value::Null);

        self.tools.execute(&tool_call.function.name, args).await
    }
}
