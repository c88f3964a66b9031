//! POST /mcp - one-shot MCP exchange

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use tokio::task::JoinSet;
use tracing::{debug, error, warn};
use uuid::Uuid;

use super::buffer::PendingResponses;
use crate::api::AppState;
use crate::protocol::{
    IncomingBody, JsonRpcError, JsonRpcMessage, JsonRpcRequest, PROTOCOL_VERSION,
};
use crate::server::McpServer;
use crate::types::{McpError, McpResult};

/// Prefix of handshake ids no client can produce
pub const SHIM_ID_PREFIX: &str = "shim-";

/// POST /mcp - run a fresh protocol core over one request body
pub async fn mcp_stateless_handler(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Response {
    let limit = state.config.transport.request_timeout;

    let result = match tokio::time::timeout(limit, run_exchange(&state, &body)).await {
        Ok(result) => result,
        Err(_) => Err(McpError::ProtocolTimeout(limit.as_millis() as u64)),
    };

    match result {
        Ok(output) => (StatusCode::OK, Json(output)).into_response(),
        Err(McpError::Json(e)) => (
            StatusCode::BAD_REQUEST,
            Json(JsonRpcError::parse_error(Value::Null, e.to_string())),
        )
            .into_response(),
        Err(McpError::ProtocolTimeout(ms)) => {
            warn!(timeout_ms = ms, "Stateless request timed out");
            (StatusCode::GATEWAY_TIMEOUT, Json(JsonRpcError::timeout(ms))).into_response()
        }
        Err(e) => {
            error!(error = %e, "Stateless request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Internal server error",
                    "details": e.to_string()
                })),
            )
                .into_response()
        }
    }
}

/// Parse, handshake, dispatch, and collect the client-visible output
pub async fn run_exchange(state: &AppState, raw: &[u8]) -> McpResult<Value> {
    let body = IncomingBody::parse(raw)?;
    let is_batch = body.is_batch();
    let messages = body.into_messages();

    if is_batch && messages.is_empty() {
        return Ok(JsonRpcError::invalid_request(Value::Null, "empty batch".to_string()).to_value());
    }

    let buffer = Arc::new(PendingResponses::new());
    let server = Arc::new(McpServer::new(
        state.server_info.clone(),
        state.registry.clone(),
        buffer.clone(),
    ));

    if !messages.iter().any(is_initialize) {
        let shim_id = Value::String(format!("{}{}", SHIM_ID_PREFIX, Uuid::new_v4()));
        buffer.ignore(&shim_id);
        server.handle_message(shim_initialize(shim_id)).await;
        server
            .handle_message(
                JsonRpcRequest::notification("notifications/initialized", None).to_value(),
            )
            .await;
    }

    for message in &messages {
        if let Some(id) = JsonRpcMessage::from_value(message.clone()).request_id() {
            buffer.expect(id);
        }
    }

    // The handshake runs inline so every dispatched request sees it.
    let (handshake, rest): (Vec<Value>, Vec<Value>) =
        messages.into_iter().partition(is_initialize);
    for message in handshake {
        server.handle_message(message).await;
    }

    let mut tasks = JoinSet::new();
    for message in rest {
        let server = server.clone();
        tasks.spawn(async move { server.handle_message(message).await });
    }

    if !buffer.settle(state.config.transport.settle_timeout).await {
        warn!(
            pending = buffer.pending_count(),
            "Settle timeout elapsed with responses outstanding"
        );
    }
    tasks.abort_all();

    let mut output = buffer.take_messages();
    debug!(responses = output.len(), batch = is_batch, "Stateless exchange complete");

    Ok(if !is_batch && output.len() == 1 {
        output.remove(0)
    } else {
        Value::Array(output)
    })
}

fn is_initialize(message: &Value) -> bool {
    message.get("method").and_then(Value::as_str) == Some("initialize")
        && message.get("id").is_some_and(|id| !id.is_null())
}

fn shim_initialize(id: Value) -> Value {
    JsonRpcRequest::new(
        id,
        "initialize",
        Some(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {},
            "clientInfo": {
                "name": "stateless-shim",
                "version": crate::VERSION
            }
        })),
    )
    .to_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initialize_detection() {
        assert!(is_initialize(
            &json!({"jsonrpc": "2.0", "id": 1, "method": "initialize"})
        ));
        assert!(!is_initialize(
            &json!({"jsonrpc": "2.0", "method": "initialize"})
        ));
        assert!(!is_initialize(&json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})));
    }

    #[test]
    fn test_shim_request_shape() {
        let shim = shim_initialize(json!("shim-x"));
        assert_eq!(shim["method"], json!("initialize"));
        assert_eq!(shim["id"], json!("shim-x"));
        assert_eq!(shim["params"]["protocolVersion"], json!(PROTOCOL_VERSION));
    }
}
