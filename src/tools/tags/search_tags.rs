//! Search tags tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Tool for resolving stock, coin, and theme names to tag codes
pub struct SearchTagsTool {
    client: Arc<RagAlgoClient>,
}

impl SearchTagsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchTagsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "search_tags".to_string(),
            description: "Look up tag codes by name. Use this FIRST whenever the user names a Korean \
                stock, a coin, or a theme: other tools need the returned tag_code \
                (e.g. 삼성전자 → STK005930, 비트코인 → CRY_BTC, 반도체 → THM_반도체)."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "q": {
                        "type": "string",
                        "description": "Search query (e.g. 삼성, Samsung, 반도체, AI, Bitcoin)"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["STOCK", "SECTOR", "THEME", "CRYPTO"],
                        "description": "Tag type filter (optional)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 50,
                        "default": 20,
                        "description": "Result count (default: 20)"
                    }
                },
                "required": ["q"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params = into_object(params);
        self.client.get("tags/search", &query_pairs(&params)).await
    }
}
