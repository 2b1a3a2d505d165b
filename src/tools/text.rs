//! Text manipulation tools.

use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Reverse the characters of a string.
pub struct ReverseText;

#[async_trait]
impl Tool for ReverseText {
    fn name(&self) -> &str {
        "reverse_text"
    }

    fn description(&self) -> &str {
        "Reverses the input text"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "The text to reverse"
                }
            },
            "required": ["text"]
        })
    }

    async fn execute(&self, args: Value) -> anyhow::Result<String> {
        let text = args["text"]
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Missing 'text' argument"))?;

        Ok(text.chars().rev().collect())
    }
}
