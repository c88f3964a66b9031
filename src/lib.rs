//! RagAlgo MCP Server
//!
//! Korean stock and crypto market data (news sentiment, chart momentum,
//! financials, sector trends, research) exposed as Model Context Protocol
//! tools. The tools are thin passthroughs to the RagAlgo data API.
//!
//! # Transports
//!
//! - **stdio**: one session over newline-delimited JSON-RPC
//! - **SSE**: `GET /sse` plus `POST /messages?sessionId=...`
//! - **Stateless HTTP**: `POST /mcp`, one fresh protocol core per request
//!
//! # Modules
//!
//! - `types`: error enum and tool outcome
//! - `protocol`: MCP and JSON-RPC protocol types
//! - `config`: environment-driven configuration
//! - `upstream`: HTTP client for the data API
//! - `tools`: registry, dispatcher, and the 12 tools
//! - `server`: protocol core and stdio transport
//! - `api`: axum router, SSE sessions, stateless adapter
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ragalgo_mcp::config::UpstreamConfig;
//! use ragalgo_mcp::server::run_stdio;
//! use ragalgo_mcp::tools::build_registry;
//! use ragalgo_mcp::{RagAlgoClient, ServerInfo};
//!
//! #[tokio::main]
//! async fn main() -> ragalgo_mcp::McpResult<()> {
//!     let client = Arc::new(RagAlgoClient::new(UpstreamConfig::default())?);
//!     let registry = Arc::new(build_registry(client)?);
//!     run_stdio(ServerInfo::default(), registry).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod protocol;
pub mod server;
pub mod tools;
pub mod types;
pub mod upstream;

// Re-export commonly used items at crate root
pub use config::Config;
pub use protocol::{McpTool, ServerInfo, Tool};
pub use server::{McpServer, MessageSink};
pub use tools::ToolRegistry;
pub use types::{McpError, McpResult, ToolOutcome};
pub use upstream::RagAlgoClient;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
