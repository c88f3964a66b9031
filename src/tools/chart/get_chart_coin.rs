//! Coin chart tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use super::CHART_ZONES;
use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, RagAlgoClient};

/// Tool for Upbit crypto technical analysis (10 candles at 12h intervals)
pub struct GetChartCoinTool {
    client: Arc<RagAlgoClient>,
}

impl GetChartCoinTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetChartCoinTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_chart_coin".to_string(),
            description: "PRIMARY tool for Korean crypto (Upbit) chart questions. Returns zone, \
                oscillator state, 10-candle scores (c0-c9), and last price."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "ticker": {
                        "type": "string",
                        "description": "Coin ticker (e.g. KRW-BTC for Bitcoin)"
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
        self.client.get("chart-coin", &query_pairs(&params)).await
    }
}
