//! Sentiment trend tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Tool for the daily news count and average sentiment of one tag
pub struct GetTrendsTool {
    client: Arc<RagAlgoClient>,
}

impl GetTrendsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetTrendsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_trends".to_string(),
            description: "Historical sentiment trend for one asset: daily news_count and \
                avg_sentiment_score over N days. REQUIRES tag_code from search_tags."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tag_code": {
                        "type": "string",
                        "description": "Tag code (e.g. STK005930, CRY_BTC)"
                    },
                    "days": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 30,
                        "default": 7,
                        "description": "Recent N days (default: 7, max: 30)"
                    }
                },
                "required": ["tag_code"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params = into_object(params);
        self.client.get("trends", &query_pairs(&params)).await
    }
}
