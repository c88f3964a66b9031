//! HTTP transports
//!
//! - `sse`: long-lived event-stream sessions
//! - `stateless`: one-shot `POST /mcp` exchanges
//! - `http`: router, liveness, health, and server card

pub mod http;
pub mod sse;
pub mod state;
pub mod stateless;

use serde::Serialize;

pub use http::{create_router, serve};
pub use state::AppState;

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn session_not_found(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "SESSION_NOT_FOUND".to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            code: "BAD_REQUEST".to_string(),
        }
    }
}
