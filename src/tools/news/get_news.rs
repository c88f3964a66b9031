//! Get news tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Filter properties shared by both news tools
pub(super) fn news_filter_properties() -> serde_json::Map<String, Value> {
    let properties = json!({
        "tag": {
            "type": "string",
            "description": "Tag CODE from search_tags (e.g. STK005930, THM001)"
        },
        "source": {
            "type": "string",
            "description": "Source filter (e.g. 한경, 매경, WSJ, Bloomberg)"
        },
        "search": { "type": "string", "description": "Title search keyword" },
        "from_date": { "type": "string", "description": "Start date (YYYY-MM-DD)" },
        "to_date": { "type": "string", "description": "End date (YYYY-MM-DD)" },
        "limit": {
            "type": "integer",
            "minimum": 1,
            "maximum": 100,
            "default": 20,
            "description": "Result count (default: 20, max: 100)"
        },
        "offset": {
            "type": "integer",
            "minimum": 0,
            "default": 0,
            "description": "Pagination offset"
        }
    });
    match properties {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    }
}

/// Tool for Korean market news without sentiment scores
pub struct GetNewsTool {
    client: Arc<RagAlgoClient>,
}

impl GetNewsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetNewsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_news".to_string(),
            description: "Korean market news WITHOUT sentiment scores, including 0-score items. \
                Filter by tag, source, keyword, and date range. Prefer get_news_scored unless \
                raw news is needed."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": news_filter_properties()
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params = into_object(params);
        self.client.get("news", &query_pairs(&params)).await
    }
}
