//! Available realtime rooms tool

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::protocol::{McpTool, Tool};
use crate::tools::into_object;
use crate::types::McpResult;
use crate::upstream::RagAlgoClient;

const ROOMS_TABLE: &str = "available_websocket_rooms";

/// Tool listing the WebSocket rooms a client can subscribe to
pub struct GetAvailableRoomsTool {
    client: Arc<RagAlgoClient>,
}

impl GetAvailableRoomsTool {
    pub fn new(client: Arc<RagAlgoClient>) -> Self {
        Self { client }
    }
}

/// PostgREST query for the rooms table
fn rooms_query(params: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut query = vec![("select".to_string(), "room_id,type,description".to_string())];

    if let Some(search) = params.get("search").and_then(Value::as_str) {
        if !search.is_empty() {
            query.push((
                "or".to_string(),
                format!("(description.ilike.*{0}*,room_id.ilike.*{0}*)", search),
            ));
        }
    }
    if let Some(room_type) = params.get("type").and_then(Value::as_str) {
        query.push(("type".to_string(), format!("eq.{}", room_type)));
    }

    let limit = params.get("limit").and_then(Value::as_u64).unwrap_or(20);
    query.push(("limit".to_string(), limit.to_string()));
    query
}

#[async_trait]
impl Tool for GetAvailableRoomsTool {
    fn definition(&self) -> McpTool {
        McpTool {
            name: "get_available_rooms".to_string(),
            description: "List realtime WebSocket rooms (tags, tickers, keywords) that a client \
                can subscribe to for live updates."
                .to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "search": {
                        "type": "string",
                        "description": "Search term for rooms (e.g. Samsung, Semiconductor)"
                    },
                    "type": {
                        "type": "string",
                        "enum": ["tag", "ticker", "keyword"],
                        "description": "Filter by room type"
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
        let rooms = self.client.rest_get(ROOMS_TABLE, &rooms_query(&params)).await?;
        let count = rooms.as_array().map(|r| r.len()).unwrap_or(0);

        Ok(json!({
            "rooms": rooms,
            "count": count,
            "help": "Use these room_ids to subscribe via WebSocket. Example: socket.emit('subscribe', 'tag:STK005930')"
        }))
    }
}
