//! Stateless HTTP transport
//!
//! `POST /mcp` runs a brand-new protocol core per request. When the body
//! carries no `initialize`, a hidden handshake is synthesized first so that
//! one-shot clients can call tools directly.

pub mod buffer;
pub mod handler;

pub use buffer::PendingResponses;
pub use handler::{mcp_stateless_handler, run_exchange, SHIM_ID_PREFIX};
