//! Stock chart tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::CHART_ZONES;
use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Tool for stock technical analysis (zone, oscillator state, 5-day scores)
pub struct GetChartStockTool {
    client: Arc<RagAlgoClient>,
}

impl GetChartStockTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetChartStockTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_chart_stock".to_string(),
            description: "PRIMARY tool for stock chart questions. Returns ticker, zone, \
                oscillator state, 5-day scores (d0-d4), and last price. Filter by zone to find \
                strong or weak stocks. Use search_tags first to get the ticker."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "Stock ticker (e.g. 005930 for Samsung)"
                    },
                    "market": {
                        "type": "string",
                        "enum": ["KOSPI", "KOSDAQ", "US", "JP", "UK"],
                        "description": "Market type"
                    },
                    "zone": {
                        "type": "string",
                        "enum": CHART_ZONES,
                        "description": "Chart zone filter"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 100,
                        "default": 20,
                        "description": "Result count"
                    }
                }
            }),
        }
    }

    async fn execute(&self, params: Value) -> McpResult<Value> {
        let params = into_object(params);
        self.client.get("chart-stock", &query_pairs(&params)).await
    }
}
