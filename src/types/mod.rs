//! Data types for the RagAlgo MCP Server
//!
//! This module contains the result types shared by tools, the protocol core,
//! and the transports.

mod error;
mod outcome;

pub use error::McpError;
pub use outcome::ToolOutcome;

/// Result type for MCP operations
pub type McpResult<T> = Result<T, McpError>;
