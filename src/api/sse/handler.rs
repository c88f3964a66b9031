//! SSE stream and message-post handlers

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse, Response,
    },
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::session::{SessionHandle, SessionStore};
use crate::api::{ApiError, AppState};
use crate::protocol::{IncomingBody, JsonRpcError};
use crate::server::McpServer;
use crate::types::McpError;

/// Query parameters for POST /messages
#[derive(Debug, Deserialize)]
pub struct MessagesParams {
    #[serde(rename = "sessionId")]
    pub session_id: Option<String>,
}

/// Marks the session closed and unregisters it when the stream is dropped
struct SessionGuard {
    handle: SessionHandle,
    sessions: Arc<dyn SessionStore>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.handle.close();
        let sessions = self.sessions.clone();
        let session_id = self.handle.id().to_string();
        let age_secs = self.handle.age_secs();
        if let Ok(runtime) = tokio::runtime::Handle::try_current() {
            runtime.spawn(async move {
                sessions.delete(&session_id).await;
                info!(session_id = %session_id, age_secs, "SSE session closed");
            });
        }
    }
}

/// Drain the inbound queue in arrival order
async fn session_worker(
    server: McpServer,
    mut inbound: mpsc::UnboundedReceiver<Value>,
    session_id: String,
) {
    while let Some(body) = inbound.recv().await {
        server.handle_incoming(IncomingBody::from_value(body)).await;
    }
    debug!(session_id = %session_id, "Session worker exited");
}

/// GET /sse - open a session and stream its outbound messages
pub async fn sse_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let (outbound_tx, mut outbound_rx) = mpsc::unbounded_channel::<Value>();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel::<Value>();

    let server = McpServer::new(
        state.server_info.clone(),
        state.registry.clone(),
        Arc::new(outbound_tx),
    );
    let handle = SessionHandle::new(inbound_tx);
    let session_id = handle.id().to_string();

    tokio::spawn(session_worker(server, inbound_rx, session_id.clone()));
    state.sessions.set(handle.clone()).await;
    info!(session_id = %session_id, "SSE session created");

    let guard = SessionGuard {
        handle,
        sessions: state.sessions.clone(),
    };

    let stream = async_stream::stream! {
        let guard = guard;
        guard.handle.mark_connected();

        yield Ok::<_, Infallible>(Event::default()
            .event("endpoint")
            .data(format!("/messages?sessionId={}", session_id)));
        yield Ok(Event::default().comment("ping"));

        while let Some(message) = outbound_rx.recv().await {
            match serde_json::to_string(&message) {
                Ok(data) => {
                    yield Ok(Event::default().event("message").data(data));
                }
                Err(e) => {
                    warn!(
                        session_id = %session_id,
                        error = %e,
                        "Failed to serialize outbound message"
                    );
                }
            }
        }
        drop(guard);
    };

    Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(state.config.transport.keep_alive)
            .text("ping"),
    )
}

/// POST /messages?sessionId=... - route a JSON-RPC body to its session
pub async fn messages_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<MessagesParams>,
    body: Bytes,
) -> Response {
    let Some(session_id) = params.session_id.filter(|id| !id.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiError::bad_request("Missing sessionId query parameter")),
        )
            .into_response();
    };

    let not_found = |id: &str| {
        (
            StatusCode::NOT_FOUND,
            Json(ApiError::session_not_found(
                McpError::SessionNotFound(id.to_string()).to_string(),
            )),
        )
            .into_response()
    };

    let Some(handle) = state.sessions.get(&session_id).await else {
        warn!(session_id = %session_id, "Message for unknown session");
        return not_found(&session_id);
    };
    if handle.is_closed() {
        return not_found(&session_id);
    }

    let body = match IncomingBody::parse(&body) {
        Ok(body) => body,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(JsonRpcError::parse_error(Value::Null, e.to_string())),
            )
                .into_response();
        }
    };

    let payload = match body {
        IncomingBody::Single(message) => message,
        IncomingBody::Batch(batch) => Value::Array(batch),
    };
    if !handle.enqueue(payload) {
        warn!(session_id = %session_id, "Message for closed session");
        return not_found(&session_id);
    }

    (StatusCode::OK, "Accepted").into_response()
}
