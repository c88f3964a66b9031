//! Closed result type for a single tool invocation

use serde_json::{json, Value};

use super::McpError;

/// Outcome of `tools/call`: either a payload or a failure message, never both
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutcome {
    Success(Value),
    Failure(String),
}

impl ToolOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Render as an MCP `CallToolResult`
    ///
    /// String payloads are emitted as-is; anything else is pretty-printed JSON.
    pub fn into_call_result(self) -> Value {
        match self {
            Self::Success(Value::String(text)) => text_content(text),
            Self::Success(payload) => {
                let text = serde_json::to_string_pretty(&payload)
                    .unwrap_or_else(|_| payload.to_string());
                text_content(text)
            }
            Self::Failure(message) => json!({
                "content": [{
                    "type": "text",
                    "text": format!("Error: {}", message)
                }],
                "isError": true
            }),
        }
    }
}

impl From<Result<Value, McpError>> for ToolOutcome {
    fn from(result: Result<Value, McpError>) -> Self {
        match result {
            Ok(payload) => Self::Success(payload),
            Err(e) => Self::Failure(e.to_string()),
        }
    }
}

fn text_content(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_payload_is_not_quoted() {
        let result = ToolOutcome::Success(json!("pong")).into_call_result();
        assert_eq!(result, json!({"content": [{"type": "text", "text": "pong"}]}));
    }

    #[test]
    fn test_object_payload_is_pretty_printed() {
        let result = ToolOutcome::Success(json!({"success": true})).into_call_result();
        let text = result["content"][0]["text"].as_str().unwrap();
        assert_eq!(text, "{\n  \"success\": true\n}");
        assert!(result.get("isError").is_none());
    }

    #[test]
    fn test_failure_sets_error_flag() {
        let result = ToolOutcome::Failure("boom".to_string()).into_call_result();
        assert_eq!(result["isError"], json!(true));
        assert_eq!(result["content"][0]["text"], json!("Error: boom"));
    }

    #[test]
    fn test_from_error_result() {
        let outcome: ToolOutcome = Err(McpError::UnknownTool("nope".to_string())).into();
        assert_eq!(outcome, ToolOutcome::Failure("Unknown tool: nope".to_string()));
    }
}
