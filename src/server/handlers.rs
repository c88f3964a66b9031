//! Request handlers for the MCP server
//!
//! This module contains helper functions for handling various request types.

use serde_json::{json, Value};

use crate::protocol::{ServerInfo, PROTOCOL_VERSION};

/// Protocol revisions this server can speak
pub const SUPPORTED_PROTOCOL_VERSIONS: &[&str] = &["2025-06-18", "2025-03-26", "2024-11-05"];

/// Extract tool arguments from params
pub fn extract_arguments(params: &Value) -> Option<Value> {
    params.get("arguments").cloned()
}

/// Extract tool name from params
pub fn extract_tool_name(params: &Value) -> Option<&str> {
    params.get("name").and_then(|v| v.as_str())
}

/// Echo the client's protocol version when supported, else offer ours
pub fn negotiate_protocol_version(params: Option<&Value>) -> &'static str {
    let requested = params
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str());

    requested
        .and_then(|r| SUPPORTED_PROTOCOL_VERSIONS.iter().find(|v| **v == r))
        .copied()
        .unwrap_or(PROTOCOL_VERSION)
}

/// Build the `initialize` result
pub fn initialize_result(info: &ServerInfo, params: Option<&Value>) -> Value {
    json!({
        "protocolVersion": negotiate_protocol_version(params),
        "capabilities": {
            "tools": {}
        },
        "serverInfo": {
            "name": info.name,
            "version": info.version
        }
    })
}
