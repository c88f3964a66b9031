//! Protocol types for MCP and JSON-RPC communication
//!
//! This module contains all protocol-related types and traits.

pub mod jsonrpc;
mod mcp;

pub use jsonrpc::{
    id_key, ErrorObject, IncomingBody, JsonRpcError, JsonRpcMessage, JsonRpcRequest,
    JsonRpcResponse,
};
pub use mcp::{McpTool, ServerInfo, Tool, PROTOCOL_VERSION};
