//! Get scored news tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::get_news::news_filter_properties;
use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Tool for Korean market news with AI sentiment scores (-10 to +10)
pub struct GetNewsScoredTool {
    client: Arc<RagAlgoClient>,
}

impl GetNewsScoredTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetNewsScoredTool {
    fn definition(&self) -> McpTool {
        let mut properties = news_filter_properties();
        properties.insert(
            "min_score".to_string(),
            json!({
                "type": "number",
                "minimum": -10,
                "maximum": 10,
                "description": "Min sentiment score (-10 to 10)"
            }),
        );
        properties.insert(
            "max_score".to_string(),
            json!({
                "type": "number",
                "minimum": -10,
                "maximum": 10,
                "description": "Max sentiment score (-10 to 10)"
            }),
        );
        properties.insert(
            "verdict".to_string(),
            json!({
                "type": "string",
                "enum": ["bullish", "bearish", "neutral"],
                "description": "Sentiment verdict filter"
            }),
        );

        McpTool {
            name: "get_news_scored".to_string(),
            description: "PRIMARY news tool for the Korean market. Returns news WITH sentiment \
                scores (-10 to +10) and a verdict; 0-score noise is filtered out. Use search_tags \
                first to get the exact tag code."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": properties
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params = into_object(params);
        self.client.get("news-scored", &query_pairs(&params)).await
    }
}
