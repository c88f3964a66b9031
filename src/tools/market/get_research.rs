//! Research reports tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Tool for consulting-firm research reports (McKinsey, BCG, ...)
pub struct GetResearchTool {
    client: Arc<RagAlgoClient>,
}

impl GetResearchTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetResearchTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_research".to_string(),
            description: "Consulting firm research reports for long-term trends and sector \
                outlooks. Returns AI summaries with tag codes for cross-referencing news and \
                charts. The full chunked text is returned; analyze it to answer."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tag_code": {
                        "type": "string",
                        "description": "Tag code (required). Use search_tags first."
                    },
                    "source": {
                        "type": "string",
                        "description": "Source filter (mckinsey, bcg, ls, ...)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 50,
                        "default": 10,
                        "description": "Result count (default: 10)"
                    },
                    "offset": {
                        "type": "integer",
                        "minimum": 0,
                        "default": 0,
                        "description": "Pagination offset"
                    }
                },
                "required": ["tag_code"]
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params = into_object(params);
        self.client.get("research", &query_pairs(&params)).await
    }
}
