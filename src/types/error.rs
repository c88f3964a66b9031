//! Error type shared by every layer of the server

use thiserror::Error;

/// Errors raised while serving MCP traffic
///
/// Tool-level variants (`Validation`, `UnknownTool`, `Upstream`, `Http`,
/// `MissingApiKey`) are always converted into failure-flagged tool results;
/// they never reach a transport as protocol errors.
#[derive(Error, Debug)]
pub enum McpError {
    /// Tool arguments did not match the tool's input schema
    #[error("Invalid arguments for tool '{tool}': {message}")]
    Validation { tool: String, message: String },

    /// No tool with this name is registered
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// The remote data API answered with a non-success status
    #[error("API request failed: {status} - {message}")]
    Upstream { status: u16, message: String },

    /// The remote data API could not be reached
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller's API key is not configured
    #[error("{0} environment variable is not set")]
    MissingApiKey(String),

    /// POST to a session id that is not (or no longer) connected
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// A stateless exchange did not finish within its hard bound
    #[error("Request timed out after {0} ms")]
    ProtocolTimeout(u64),

    /// Invalid startup configuration
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// Build a validation error for `tool`
    pub fn validation(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// True for failures that belong to a single tool call
    pub fn is_tool_failure(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::UnknownTool(_)
                | Self::Upstream { .. }
                | Self::Http(_)
                | Self::MissingApiKey(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_tool_and_field() {
        let err = McpError::validation("search_tags", "\"q\" is a required property");
        assert_eq!(
            err.to_string(),
            "Invalid arguments for tool 'search_tags': \"q\" is a required property"
        );
        assert!(err.is_tool_failure());
    }

    #[test]
    fn test_upstream_message_carries_status() {
        let err = McpError::Upstream {
            status: 401,
            message: "bad key".to_string(),
        };
        assert_eq!(err.to_string(), "API request failed: 401 - bad key");
    }

    #[test]
    fn test_transport_errors_are_not_tool_failures() {
        assert!(!McpError::SessionNotFound("abc".to_string()).is_tool_failure());
        assert!(!McpError::ProtocolTimeout(100).is_tool_failure());
    }
}
