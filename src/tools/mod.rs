//! MCP Tools implementation
//!
//! This module contains all 12 MCP tools organized by category:
//! - Tag tools (2): name lookup and text matching
//! - News tools (2): raw and sentiment-scored news
//! - Chart tools (2): stock and coin momentum
//! - Market tools (4): snapshots, financials, trends, research
//! - Realtime tools (1): WebSocket room discovery
//! - System tools (1): ping

pub mod chart;
pub mod market;
pub mod news;
pub mod realtime;
pub mod registry;
pub mod system;
pub mod tags;

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::types::McpResult;
use crate::upstream::RagAlgoClient;

// Re-export all tools for convenience
pub use chart::{GetChartCoinTool, GetChartStockTool};
pub use market::{GetFinancialsTool, GetResearchTool, GetSnapshotsTool, GetTrendsTool};
pub use news::{GetNewsScoredTool, GetNewsTool};
pub use realtime::GetAvailableRoomsTool;
pub use registry::{SharedRegistry, ToolRegistry};
pub use system::PingTool;
pub use tags::{MatchTagsTool, SearchTagsTool};

/// Register all tools with the registry
pub fn register_all_tools(
    registry: &mut ToolRegistry,
    client: Arc<RagAlgoClient>,
) -> McpResult<()> {
    // Tag tools (2)
    registry.register_tool(Box::new(SearchTagsTool::new(client.clone())))?;
    registry.register_tool(Box::new(MatchTagsTool::new(client.clone())))?;

    // News tools (2)
    registry.register_tool(Box::new(GetNewsTool::new(client.clone())))?;
    registry.register_tool(Box::new(GetNewsScoredTool::new(client.clone())))?;

    // Chart tools (2)
    registry.register_tool(Box::new(GetChartStockTool::new(client.clone())))?;
    registry.register_tool(Box::new(GetChartCoinTool::new(client.clone())))?;

    // Market tools (4)
    registry.register_tool(Box::new(GetSnapshotsTool::new(client.clone())))?;
    registry.register_tool(Box::new(GetFinancialsTool::new(client.clone())))?;
    registry.register_tool(Box::new(GetTrendsTool::new(client.clone())))?;
    registry.register_tool(Box::new(GetResearchTool::new(client.clone())))?;

    // Realtime tools (1)
    registry.register_tool(Box::new(GetAvailableRoomsTool::new(client)))?;

    // System tools (1)
    registry.register_tool(Box::new(PingTool::new()))?;
    Ok(())
}

/// Build the full catalog backed by `client`
pub fn build_registry(client: Arc<RagAlgoClient>) -> McpResult<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    register_all_tools(&mut registry, client)?;
    Ok(registry)
}

/// Validated arguments as an owned JSON object
pub(crate) fn into_object(params: Value) -> Map<String, Value> {
    match params {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UpstreamConfig;

    #[test]
    fn test_catalog_is_complete() {
        let client = Arc::new(RagAlgoClient::new(UpstreamConfig::default()).unwrap());
        let registry = build_registry(client).unwrap();
        assert_eq!(
            registry.tool_names(),
            vec![
                "get_available_rooms",
                "get_chart_coin",
                "get_chart_stock",
                "get_financials",
                "get_news",
                "get_news_scored",
                "get_research",
                "get_snapshots",
                "get_trends",
                "match_tags",
                "ping",
                "search_tags",
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_the_call_not_the_registry() {
        let config = UpstreamConfig {
            api_key_env: "RAGALGO_TEST_NEVER_SET_KEY".to_string(),
            ..UpstreamConfig::default()
        };
        let registry = build_registry(Arc::new(RagAlgoClient::new(config).unwrap())).unwrap();

        let outcome = registry
            .call_tool("get_trends", Some(serde_json::json!({"tag_code": "STK005930"})))
            .await;
        assert_eq!(
            outcome,
            crate::types::ToolOutcome::Failure(
                "RAGALGO_TEST_NEVER_SET_KEY environment variable is not set".to_string()
            )
        );
    }
}
