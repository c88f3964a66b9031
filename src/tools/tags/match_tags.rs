//! Match tags tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::types::McpResult;
use crate::upstream::RagAlgoClient;

/// Tool for extracting stock/crypto/theme tags mentioned in free text
pub struct MatchTagsTool {
    client: Arc<RagAlgoClient>,
}

impl MatchTagsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for MatchTagsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "match_tags".to_string(),
            description: "Extract stock, crypto, and theme tags from any text, e.g. a news title \
                like \"삼성전자 HBM 대박 소식\". Returns matched tags with match types."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "text": {
                        "type": "string",
                        "description": "Text to analyze"
                    },
                    "types": {
                        "type": "array",
                        "items": {
                            "type": "string",
                            "enum": ["STOCK", "SECTOR", "THEME", "CRYPTO"]
                        },
                        "description": "Tag type filter (optional)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 20,
                        "default": 10,
                        "description": "Result count (default: 10)"
                    }
                },
                "required": ["text"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        self.client.post("tags-match", &params).await
    }
}
