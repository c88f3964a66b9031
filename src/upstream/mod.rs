//! HTTP client for the RagAlgo data API
//!
//! Every tool except `ping` is a thin passthrough onto one of these calls:
//! - `get` / `post` hit the edge functions under `api_url`
//! - `rest_get` reads a table under `rest_url`

use reqwest::{Client, Method, RequestBuilder};
use serde_json::{Map, Value};
use tracing::debug;

use crate::config::UpstreamConfig;
use crate::types::{McpError, McpResult};

/// Shared client for the remote data API
#[derive(Debug, Clone)]
pub struct RagAlgoClient {
    client: Client,
    config: UpstreamConfig,
}

impl RagAlgoClient {
    pub fn new(config: UpstreamConfig) -> McpResult<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /// GET an edge function with query parameters
    pub async fn get(&self, endpoint: &str, query: &[(String, String)]) -> McpResult<Value> {
        let url = format!("{}/{}", self.config.api_url, endpoint);
        let request = self.build_request(Method::GET, &url)?.query(query);
        self.send(request, endpoint).await
    }

    /// POST a JSON body to an edge function
    pub async fn post(&self, endpoint: &str, body: &Value) -> McpResult<Value> {
        let url = format!("{}/{}", self.config.api_url, endpoint);
        let request = self.build_request(Method::POST, &url)?.json(body);
        self.send(request, endpoint).await
    }

    /// GET a REST table with PostgREST-style query parameters
    pub async fn rest_get(&self, table: &str, query: &[(String, String)]) -> McpResult<Value> {
        let url = format!("{}/{}", self.config.rest_url, table);
        let request = self
            .build_request(Method::GET, &url)?
            .header("apikey", &self.config.anon_key)
            .query(query);
        self.send(request, table).await
    }

    /// Builds a request with authentication headers
    fn build_request(&self, method: Method, url: &str) -> McpResult<RequestBuilder> {
        let api_key = self.config.resolve_api_key()?;
        Ok(self
            .client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.config.anon_key))
            .header("x-api-key", api_key)
            .header("Content-Type", "application/json"))
    }

    async fn send(&self, request: RequestBuilder, endpoint: &str) -> McpResult<Value> {
        let response = request.send().await?;
        let status = response.status();
        debug!(endpoint, status = status.as_u16(), "Upstream response");

        if status.is_success() {
            Ok(response.json().await?)
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(McpError::Upstream {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Flatten a JSON object into query pairs
///
/// Nulls are skipped, arrays are comma-joined, other scalars use their JSON text.
pub fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    params
        .iter()
        .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v)))
        .collect()
}

fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(query_value)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => Some(other.to_string()),
    }
}

/// Remove `key` from `params` and append it to `base` as an encoded path segment
pub fn take_path_segment(base: &str, params: &mut Map<String, Value>, key: &str) -> String {
    match params.remove(key) {
        Some(Value::String(segment)) if !segment.is_empty() => {
            format!("{}/{}", base, urlencoding::encode(&segment))
        }
        _ => base.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_query_pairs_formats_values() {
        let params = object(json!({
            "q": "삼성",
            "limit": 20,
            "missing": null,
            "types": ["STOCK", "THEME"],
            "flag": true
        }));
        let mut pairs = query_pairs(&params);
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("flag".to_string(), "true".to_string()),
                ("limit".to_string(), "20".to_string()),
                ("q".to_string(), "삼성".to_string()),
                ("types".to_string(), "STOCK,THEME".to_string()),
            ]
        );
    }

    #[test]
    fn test_take_path_segment_encodes_and_removes() {
        let mut params = object(json!({"tag_code": "THM_반도체", "days": 7}));
        let endpoint = take_path_segment("snapshots", &mut params, "tag_code");
        assert_eq!(endpoint, "snapshots/THM_%EB%B0%98%EB%8F%84%EC%B2%B4");
        assert!(!params.contains_key("tag_code"));
        assert!(params.contains_key("days"));
    }

    #[test]
    fn test_take_path_segment_without_value() {
        let mut params = object(json!({"days": 7}));
        assert_eq!(take_path_segment("snapshots", &mut params, "tag_code"), "snapshots");
    }
}
