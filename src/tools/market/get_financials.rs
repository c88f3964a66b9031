//! Financial statements tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, take_path_segment, RagAlgoClient};

/// Tool for quarterly fundamentals (PER, PBR, ROE, revenue, ...)
pub struct GetFinancialsTool {
    client: Arc<RagAlgoClient>,
}

impl GetFinancialsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetFinancialsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_financials".to_string(),
            description: "PRIMARY tool for Korean stock fundamentals. Returns quarterly PER, PBR, \
                ROE, ROA, revenue, operating income, net income, debt ratio, and dividend yield. \
                Without a ticker it screens the whole market."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ticker": { "type": "string", "description": "Stock ticker (e.g. 005930)" },
                    "period": { "type": "string", "description": "Quarter (e.g. 2024Q3)" },
                    "market": {
                        "type": "string",
                        "enum": ["KOSPI", "KOSDAQ"],
                        "description": "Market type"
                    },
                    "periods": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 8,
                        "default": 4,
                        "description": "Recent N quarters (default: 4)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 200,
                        "default": 50,
                        "description": "Result count"
                    },
                    "offset": {
                        "type": "integer",
                        "minimum": 0,
                        "default": 0,
                        "description": "Pagination offset"
                    }
                }
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let mut params = into_object(params);
        let endpoint = take_path_segment("financials", &mut params, "ticker");
        self.client.get(&endpoint, &query_pairs(&params)).await
    }
}
