//! Outbound side of a protocol core

use serde_json::Value;
use tokio::sync::mpsc;
use tracing::debug;

/// Destination for every message a protocol core emits
///
/// Each transport binds one sink per core: the stdio writer, an SSE event
/// stream, or a stateless request's pending-response buffer.
pub trait MessageSink: Send + Sync {
    fn deliver(&self, message: Value);
}

impl MessageSink for mpsc::UnboundedSender<Value> {
    fn deliver(&self, message: Value) {
        // A closed receiver means the peer went away; the result is discarded.
        if self.send(message).is_err() {
            debug!("Outbound channel closed, dropping message");
        }
    }
}
