//! JSON-RPC 2.0 protocol types

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const PARSE_ERROR: i32 = -32700;
pub const INVALID_REQUEST: i32 = -32600;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const INTERNAL_ERROR: i32 = -32603;
pub const REQUEST_TIMEOUT: i32 = -32001;
pub const NOT_INITIALIZED: i32 = -32002;

/// JSON-RPC 2.0 Request (or notification when `id` is absent)
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
}

impl JsonRpcRequest {
    /// Build a request carrying `id`
    pub fn new(id: Value, method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id),
            method: method.into(),
            params,
        }
    }

    /// Build a notification (no id)
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: method.into(),
            params,
        }
    }

    /// Check if this is a notification (no id)
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// JSON-RPC 2.0 Success Response
#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcResponse {
    pub jsonrpc: String,
    pub id: Value,
    pub result: Value,
}

impl JsonRpcResponse {
    /// Create a new success response
    pub fn new(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result,
        }
    }
}

/// JSON-RPC 2.0 Error Response
#[derive(Serialize, Deserialize, Debug)]
pub struct JsonRpcError {
    pub jsonrpc: String,
    pub id: Value,
    pub error: ErrorObject,
}

impl JsonRpcError {
    /// Create a new error response
    pub fn new(id: Value, code: i32, message: String, data: Option<Value>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            error: ErrorObject {
                code,
                message,
                data,
            },
        }
    }

    /// Create a parse error response
    pub fn parse_error(id: Value, details: String) -> Self {
        Self::new(
            id,
            PARSE_ERROR,
            "Parse error".to_string(),
            Some(json!({"details": details})),
        )
    }

    /// Create an invalid request error response
    pub fn invalid_request(id: Value, details: String) -> Self {
        Self::new(
            id,
            INVALID_REQUEST,
            "Invalid Request".to_string(),
            Some(json!({"details": details})),
        )
    }

    /// Create a method not found error response
    pub fn method_not_found(id: Value, method: String) -> Self {
        Self::new(
            id,
            METHOD_NOT_FOUND,
            "Method not found".to_string(),
            Some(json!({"method": method})),
        )
    }

    /// Create an invalid params error response
    pub fn invalid_params(id: Value, details: String) -> Self {
        Self::new(
            id,
            INVALID_PARAMS,
            "Invalid params".to_string(),
            Some(json!({"details": details})),
        )
    }

    /// Create an internal error response
    pub fn internal_error(id: Value, details: String) -> Self {
        Self::new(
            id,
            INTERNAL_ERROR,
            "Internal error".to_string(),
            Some(json!({"details": details})),
        )
    }

    pub fn not_initialized(id: Value, method: String) -> Self {
        Self::new(
            id,
            NOT_INITIALIZED,
            "Server not initialized".to_string(),
            Some(json!({"method": method})),
        )
    }

    pub fn timeout(timeout_ms: u64) -> Self {
        Self::new(
            Value::Null,
            REQUEST_TIMEOUT,
            "Request timed out".to_string(),
            Some(json!({"timeoutMs": timeout_ms})),
        )
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// JSON-RPC 2.0 Error Object
#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorObject {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

/// One inbound JSON-RPC message, classified by shape
#[derive(Debug, Clone)]
pub enum JsonRpcMessage {
    Request(JsonRpcRequest),
    Notification(JsonRpcRequest),
    /// A reply from the peer; the server never issues requests, so these are dropped
    Response { id: Value },
    /// Anything else; carries the id when one could be recovered
    Invalid { id: Value, details: String },
}

impl JsonRpcMessage {
    pub fn from_value(value: Value) -> Self {
        let id = value.get("id").cloned().unwrap_or(Value::Null);

        let Some(object) = value.as_object() else {
            return Self::Invalid {
                id: Value::Null,
                details: "message must be a JSON object".to_string(),
            };
        };

        if object.get("jsonrpc").and_then(Value::as_str) != Some("2.0") {
            return Self::Invalid {
                id,
                details: "jsonrpc must be '2.0'".to_string(),
            };
        }

        if object.contains_key("method") {
            return match serde_json::from_value::<JsonRpcRequest>(value) {
                Ok(request) if request.is_notification() => Self::Notification(request),
                Ok(request) => match request.id {
                    Some(Value::String(_)) | Some(Value::Number(_)) => Self::Request(request),
                    _ => Self::Invalid {
                        id: Value::Null,
                        details: "id must be a string or a number".to_string(),
                    },
                },
                Err(e) => Self::Invalid {
                    id,
                    details: e.to_string(),
                },
            };
        }

        if object.contains_key("result") || object.contains_key("error") {
            return Self::Response { id };
        }

        Self::Invalid {
            id,
            details: "message has neither method nor result".to_string(),
        }
    }

    /// Id of a request that expects a response
    pub fn request_id(&self) -> Option<&Value> {
        match self {
            Self::Request(r) => r.id.as_ref(),
            _ => None,
        }
    }
}

/// Comparable key for a request id; `1` and `"1"` stay distinct
pub fn id_key(id: &Value) -> String {
    id.to_string()
}

/// A request body: one message or a batch, remembering which
#[derive(Debug, Clone)]
pub enum IncomingBody {
    Single(Value),
    Batch(Vec<Value>),
}

impl IncomingBody {
    pub fn parse(raw: &[u8]) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_slice(raw)?;
        Ok(Self::from_value(value))
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(items) => Self::Batch(items),
            other => Self::Single(other),
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, Self::Batch(_))
    }

    pub fn into_messages(self) -> Vec<Value> {
        match self {
            Self::Single(value) => vec![value],
            Self::Batch(items) => items,
        }
    }
}
