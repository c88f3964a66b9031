//! Daily snapshot tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::{query_pairs, take_path_segment, RagAlgoClient};

/// Tool for the daily news + chart + sentiment summary
///
/// Snapshots are generated at 17:00 KST; a same-day request before then
/// comes back empty.
pub struct GetSnapshotsTool {
    client: Arc<RagAlgoClient>,
}

impl GetSnapshotsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetSnapshotsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_snapshots".to_string(),
            description: "Daily market summary: the ONLY tool that returns news count, average \
                sentiment, bullish/bearish counts, chart score, zone, and price in one call. Use \
                it first for general market questions. Snapshots are generated daily at 17:00 KST; \
                if today's is empty, fetch yesterday's and call get_news_scored for today."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "tag_code": {
                        "type": "string",
                        "description": "Tag code for one asset (e.g. STK005930, CRY_BTC). Leave empty for a market-wide overview."
                    },
                    "date": { "type": "string", "description": "Date (YYYY-MM-DD). Default: today" },
                    "days": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 30,
                        "default": 7,
                        "description": "Recent N days for time-series (default: 7)"
                    },
                    "limit": {
                        "type": "integer",
                        "minimum": 1,
                        "maximum": 100,
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
        let endpoint = take_path_segment("snapshots", &mut params, "tag_code");
        self.client.get(&endpoint, &query_pairs(&params)).await
    }
}
