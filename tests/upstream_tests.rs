//! Tool calls against a local mock of the RagAlgo data API

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use ragalgo_mcp::config::UpstreamConfig;
use ragalgo_mcp::tools::{build_registry, ToolRegistry};
use ragalgo_mcp::{RagAlgoClient, ToolOutcome};

fn header(headers: &HeaderMap, name: &str) -> Value {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(|v| json!(v))
        .unwrap_or(Value::Null)
}

async fn news(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "success": true,
        "query": query,
        "auth": header(&headers, "authorization"),
        "api_key": header(&headers, "x-api-key")
    }))
}

async fn financials(
    Path(ticker): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Json<Value> {
    Json(json!({ "ticker": ticker, "query": query }))
}

async fn tags_match(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "echo": body }))
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn rooms(headers: HeaderMap, Query(query): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!([{
        "type_filter": query.get("type").cloned().unwrap_or_default(),
        "apikey": header(&headers, "apikey")
    }]))
}

/// Serve the mock API on an ephemeral port and return its base URL
async fn spawn_mock() -> String {
    let app = Router::new()
        .route("/functions/news", get(news))
        .route("/functions/financials/:ticker", get(financials))
        .route("/functions/tags-match", post(tags_match))
        .route("/functions/trends", get(broken))
        .route("/rest/available_websocket_rooms", get(rooms));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn registry() -> ToolRegistry {
    let base = spawn_mock().await;
    let config = UpstreamConfig {
        api_url: format!("{}/functions", base),
        rest_url: format!("{}/rest", base),
        anon_key: "anon-test".to_string(),
        api_key: Some("key-test".to_string()),
        ..UpstreamConfig::default()
    };
    build_registry(Arc::new(RagAlgoClient::new(config).unwrap())).unwrap()
}

fn success(outcome: ToolOutcome) -> Value {
    match outcome {
        ToolOutcome::Success(payload) => payload,
        ToolOutcome::Failure(message) => panic!("expected success, got failure: {}", message),
    }
}

#[tokio::test]
async fn test_news_forwards_filters_defaults_and_headers() {
    let registry = registry().await;
    let payload = success(
        registry
            .call_tool("get_news", Some(json!({"tag": "STK005930", "source": "한경"})))
            .await,
    );

    assert_eq!(payload["query"]["tag"], json!("STK005930"));
    assert_eq!(payload["query"]["source"], json!("한경"));
    assert_eq!(payload["query"]["limit"], json!("20"));
    assert_eq!(payload["query"]["offset"], json!("0"));
    assert_eq!(payload["auth"], json!("Bearer anon-test"));
    assert_eq!(payload["api_key"], json!("key-test"));
}

#[tokio::test]
async fn test_financials_ticker_goes_into_the_path() {
    let registry = registry().await;
    let payload = success(
        registry
            .call_tool("get_financials", Some(json!({"ticker": "005930"})))
            .await,
    );

    assert_eq!(payload["ticker"], json!("005930"));
    assert!(payload["query"].get("ticker").is_none());
    assert_eq!(payload["query"]["periods"], json!("4"));
}

#[tokio::test]
async fn test_match_tags_posts_json_body() {
    let registry = registry().await;
    let payload = success(
        registry
            .call_tool("match_tags", Some(json!({"text": "삼성전자 실적 발표"})))
            .await,
    );
    assert_eq!(payload["echo"]["text"], json!("삼성전자 실적 발표"));
}

#[tokio::test]
async fn test_upstream_error_becomes_failure_outcome() {
    let registry = registry().await;
    let outcome = registry
        .call_tool("get_trends", Some(json!({"tag_code": "STK005930"})))
        .await;

    match outcome {
        ToolOutcome::Failure(message) => {
            assert!(message.starts_with("API request failed: 500"), "{}", message);
            assert!(message.contains("upstream exploded"), "{}", message);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_available_rooms_reads_rest_table() {
    let registry = registry().await;
    let payload = success(
        registry
            .call_tool("get_available_rooms", Some(json!({"type": "ticker"})))
            .await,
    );

    assert_eq!(payload["count"], json!(1));
    assert_eq!(payload["rooms"][0]["type_filter"], json!("eq.ticker"));
    assert_eq!(payload["rooms"][0]["apikey"], json!("anon-test"));
}

#[tokio::test]
async fn test_unreachable_upstream_is_failure_not_panic() {
    let config = UpstreamConfig {
        api_url: "http://127.0.0.1:9".to_string(),
        api_key: Some("key-test".to_string()),
        ..UpstreamConfig::default()
    };
    let registry = build_registry(Arc::new(RagAlgoClient::new(config).unwrap())).unwrap();

    let outcome = registry
        .call_tool("get_research", Some(json!({"tag_code": "THM001"})))
        .await;
    match outcome {
        ToolOutcome::Failure(message) => assert!(message.starts_with("HTTP error"), "{}", message),
        other => panic!("expected failure, got {:?}", other),
    }
}
