//! HTTP server setup with Axum

use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::sse::{messages_handler, sse_handler};
use super::stateless::mcp_stateless_handler;
use super::AppState;
use crate::protocol::PROTOCOL_VERSION;
use crate::types::McpResult;

/// Create the Axum router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration - browser-hosted agents connect from any origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/.well-known/mcp-server-card", get(server_card))
        // SSE transport
        .route("/sse", get(sse_handler))
        .route("/messages", post(messages_handler))
        // Stateless transport
        .route("/mcp", post(mcp_stateless_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind and serve until `shutdown` resolves
pub async fn serve<F>(state: Arc<AppState>, shutdown: F) -> McpResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = state.config.bind_addr();
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "RagAlgo MCP Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Liveness probe
async fn root() -> &'static str {
    "RagAlgo MCP Server Running"
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: String,
    pub sessions: usize,
}

/// Health check endpoint
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok",
        version: state.server_info.version.clone(),
        sessions: state.sessions.len().await,
    })
}

/// Static capability descriptor for registry scanners
async fn server_card(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "name": "RagAlgo MCP Server",
        "description": "Korean Stock & Crypto Analysis",
        "version": state.server_info.version,
        "protocolVersion": PROTOCOL_VERSION,
        "capabilities": { "tools": {} },
        "transports": {
            "sse": { "endpoint": "/sse", "messages": "/messages" },
            "streamableHttp": { "endpoint": "/mcp" }
        },
        "tools": state.registry.tool_names()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::tools::{PingTool, ToolRegistry};
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;

    fn app() -> Router {
        let mut registry = ToolRegistry::new();
        registry.register_tool(Box::new(PingTool::new())).unwrap();
        let state = Arc::new(AppState::new(Config::default(), Arc::new(registry)));
        create_router(state)
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_is_live() {
        let response = app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"RagAlgo MCP Server Running");
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = app()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["status"], json!("ok"));
        assert_eq!(body["version"], json!(env!("CARGO_PKG_VERSION")));
        assert_eq!(body["sessions"], json!(0));
    }

    #[tokio::test]
    async fn test_server_card_lists_tools() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/.well-known/mcp-server-card")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        let body = body_json(response).await;
        assert_eq!(body["name"], json!("RagAlgo MCP Server"));
        assert_eq!(body["tools"], json!(["ping"]));
    }
}
