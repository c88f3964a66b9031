//! MCP protocol core
//!
//! `McpServer` holds the handshake state of one connected transport and
//! answers JSON-RPC traffic. It never writes to a socket itself: every
//! outbound message goes to the `MessageSink` it was bound to.

mod handlers;
mod sink;
mod stdio;

use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::protocol::{
    IncomingBody, JsonRpcError, JsonRpcMessage, JsonRpcRequest, JsonRpcResponse, ServerInfo,
};
use crate::tools::SharedRegistry;

pub use handlers::*;
pub use sink::MessageSink;
pub use stdio::{run_stdio, serve_lines};

/// Where a core is in the initialize → initialized exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeState {
    /// No `initialize` seen; only `initialize` and `ping` are served
    AwaitingInitialize,
    /// `initialize` answered, `notifications/initialized` not yet received
    Initializing,
    Ready,
}

/// MCP Server bound to a single transport
pub struct McpServer {
    server_info: ServerInfo,
    registry: SharedRegistry,
    sink: Arc<dyn MessageSink>,
    state: Mutex<HandshakeState>,
}

impl McpServer {
    /// Create a core that writes its output to `sink`
    pub fn new(
        server_info: ServerInfo,
        registry: SharedRegistry,
        sink: Arc<dyn MessageSink>,
    ) -> Self {
        Self {
            server_info,
            registry,
            sink,
            state: Mutex::new(HandshakeState::AwaitingInitialize),
        }
    }

    pub fn handshake_state(&self) -> HandshakeState {
        *self.state.lock()
    }

    /// Handle one raw line of newline-delimited JSON-RPC
    pub async fn handle_line(&self, line: &[u8]) {
        match IncomingBody::parse(line) {
            Ok(body) => self.handle_incoming(body).await,
            Err(e) => self
                .sink
                .deliver(JsonRpcError::parse_error(Value::Null, e.to_string()).to_value()),
        }
    }

    /// Handle an already-parsed body, keeping batch framing
    pub async fn handle_incoming(&self, body: IncomingBody) {
        match body {
            IncomingBody::Single(message) => self.handle_message(message).await,
            IncomingBody::Batch(batch) => self.handle_batch(batch).await,
        }
    }

    /// Handle one message, delivering its response (if any) to the sink
    pub async fn handle_message(&self, message: Value) {
        if let Some(response) = self.process(message).await {
            self.sink.deliver(response);
        }
    }

    /// Handle a batch, delivering all responses as one array
    pub async fn handle_batch(&self, batch: Vec<Value>) {
        if batch.is_empty() {
            self.sink.deliver(
                JsonRpcError::invalid_request(Value::Null, "empty batch".to_string()).to_value(),
            );
            return;
        }

        let mut responses = Vec::with_capacity(batch.len());
        for message in batch {
            if let Some(response) = self.process(message).await {
                responses.push(response);
            }
        }
        if !responses.is_empty() {
            self.sink.deliver(Value::Array(responses));
        }
    }

    /// Process one message and return its response without delivering it
    pub async fn process(&self, message: Value) -> Option<Value> {
        match JsonRpcMessage::from_value(message) {
            JsonRpcMessage::Request(request) => Some(self.handle_request(request).await),
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(&notification);
                None
            }
            JsonRpcMessage::Response { id } => {
                debug!(%id, "Ignoring response from client");
                None
            }
            JsonRpcMessage::Invalid { id, details } => {
                warn!(%details, "Invalid JSON-RPC message");
                Some(JsonRpcError::invalid_request(id, details).to_value())
            }
        }
    }

    /// Handle a single JSON-RPC request
    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone().unwrap_or(Value::Null);
        let method = request.method.as_str();

        if !matches!(method, "initialize" | "ping")
            && self.handshake_state() == HandshakeState::AwaitingInitialize
        {
            return JsonRpcError::not_initialized(id, request.method).to_value();
        }

        match method {
            "initialize" => self.handle_initialize(id, request.params.as_ref()),
            "ping" => success(id, json!({})),
            "tools/list" => self.handle_tools_list(id),
            "tools/call" => self.handle_tool_call(id, request.params).await,
            _ => JsonRpcError::method_not_found(id, request.method).to_value(),
        }
    }

    fn handle_notification(&self, notification: &JsonRpcRequest) {
        match notification.method.as_str() {
            "notifications/initialized" => {
                let mut state = self.state.lock();
                if *state == HandshakeState::AwaitingInitialize {
                    warn!("initialized notification received before initialize");
                }
                *state = HandshakeState::Ready;
            }
            method => debug!(method, "Ignoring notification"),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self, id: Value, params: Option<&Value>) -> Value {
        {
            let mut state = self.state.lock();
            if *state == HandshakeState::AwaitingInitialize {
                *state = HandshakeState::Initializing;
            }
        }
        success(id, initialize_result(&self.server_info, params))
    }

    /// Handle tools/list request
    fn handle_tools_list(&self, id: Value) -> Value {
        success(id, json!({ "tools": self.registry.list_tools() }))
    }

    /// Handle tools/call request
    async fn handle_tool_call(&self, id: Value, params: Option<Value>) -> Value {
        let Some(params) = params else {
            return JsonRpcError::invalid_params(id, "Missing parameters".to_string()).to_value();
        };
        let Some(tool_name) = extract_tool_name(&params) else {
            return JsonRpcError::invalid_params(id, "Missing tool name".to_string()).to_value();
        };

        let outcome = self
            .registry
            .call_tool(tool_name, extract_arguments(&params))
            .await;
        success(id, outcome.into_call_result())
    }
}

fn success(id: Value, result: Value) -> Value {
    serde_json::to_value(JsonRpcResponse::new(id.clone(), result))
        .unwrap_or_else(|e| JsonRpcError::internal_error(id, e.to_string()).to_value())
}
