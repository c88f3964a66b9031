//! Ping tool

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::types::McpResult;

/// Connectivity check that never touches the upstream API
pub struct PingTool;

impl PingTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PingTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for PingTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "ping".to_string(),
            description: "Check that the server is reachable. Returns \"pong\".".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {}
            }),
        }
    }

    async fn execute(&self, _params: Value) -> McpResult<Value> {
        Ok(json!("pong"))
    }
}
