//! Clock tools.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::Tool;

/// Report the current UTC time.
pub struct UtcTime;

#[async_trait]
impl Tool for UtcTime {
    fn name(&self) -> &str {
        "utc_time"
    }

    fn description(&self) -> &str {
        "Returns current UTC time"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {}
        })
    }

    async fn execute(&self, _args: Value) -> anyhow::Result<String> {
        Ok(Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string())
    }
}
