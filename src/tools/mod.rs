//! Tools available to the agent loop.
//!
//! Each tool is a named, stateless callable the model can invoke. The
//! registry owns the active tool set, hands their JSON schemas to the
//! LLM, and dispatches execution by name.

mod text;
mod time;
mod virustotal;

pub use text::ReverseText;
pub use time::UtcTime;
pub use virustotal::IpReputation;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

/// A tool the agent can invoke.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name (must match what the model calls).
    fn name(&self) -> &str;

    /// Human-readable description shown to the model.
    fn description(&self) -> &str;

    /// JSON Schema for the tool's arguments.
    fn parameters_schema(&self) -> Value;

    /// Execute the tool with parsed arguments.
    async fn execute(&self, args: Value) -> anyhow::Result<String>;
}

/// Basic tool metadata, used when building the system prompt.
pub struct ToolInfo {
    pub name: String,
    pub description: String,
}

/// The set of tools exposed to the agent.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create the default registry: text reversal, UTC time, and IP
    /// reputation lookup. A missing VirusTotal key degrades only the
    /// reputation tool.
    pub fn new(vt_api_key: Option<String>) -> Self {
        Self {
            tools: vec![
                Arc::new(ReverseText),
                Arc::new(UtcTime),
                Arc::new(IpReputation::new(vt_api_key)),
            ],
        }
    }

    /// Build a registry from an explicit tool set (useful for testing).
    pub fn from_tools(tools: Vec<Arc<dyn Tool>>) -> Self {
        Self { tools }
    }

    /// Tool definitions in the chat completions `tools` format.
    pub fn get_tool_schemas(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "type": "function",
                    "function": {
                        "name": tool.name(),
                        "description": tool.description(),
                        "parameters": tool.parameters_schema(),
                    }
                })
            })
            .collect()
    }

    /// Names and descriptions of the registered tools.
    pub fn list_tools(&self) -> Vec<ToolInfo> {
        self.tools
            .iter()
            .map(|tool| ToolInfo {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
            })
            .collect()
    }

    /// Execute a tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> anyhow::Result<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.name() == name)
            .ok_or_else(|| anyhow::anyhow!("Unknown tool: {}", name))?;

        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registry_exposes_three_default_tools() {
        let registry = ToolRegistry::new(None);
        let schemas = registry.get_tool_schemas();
        assert_eq!(schemas.len(), 3);

        let names: Vec<_> = registry.list_tools().into_iter().map(|t| t.name).collect();
        assert!(names.contains(&"reverse_text".to_string()));
        assert!(names.contains(&"utc_time".to_string()));
        assert!(names.contains(&"virustotal_ip_lookup".to_string()));
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let registry = ToolRegistry::new(None);
        let err = registry
            .execute("no_such_tool", serde_json::json!({}))
            .await
            .expect_err("unknown tool should fail");
        assert!(err.to_string().contains("no_such_tool"));
    }
}
