//! Pending-response buffer for one stateless exchange

use std::collections::HashSet;
use std::time::Duration;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;
use tracing::debug;

use crate::protocol::id_key;
use crate::server::MessageSink;

#[derive(Default)]
struct BufferState {
    pending: HashSet<String>,
    ignored: HashSet<String>,
    messages: Vec<Value>,
}

/// Collects a core's output until every expected response has arrived
///
/// Lives for exactly one POST; never shared between requests.
#[derive(Default)]
pub struct PendingResponses {
    state: Mutex<BufferState>,
    settled: Notify,
}

impl PendingResponses {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a request id whose response must be collected
    pub fn expect(&self, id: &Value) {
        self.state.lock().pending.insert(id_key(id));
    }

    /// Register an id whose response is swallowed
    pub fn ignore(&self, id: &Value) {
        self.state.lock().ignored.insert(id_key(id));
    }

    pub fn pending_count(&self) -> usize {
        self.state.lock().pending.len()
    }

    /// Wait until nothing is pending, at most `timeout`
    ///
    /// Returns false when the timeout elapsed with responses still missing.
    pub async fn settle(&self, timeout: Duration) -> bool {
        let wait = async {
            loop {
                let notified = self.settled.notified();
                if self.state.lock().pending.is_empty() {
                    return;
                }
                notified.await;
            }
        };
        tokio::time::timeout(timeout, wait).await.is_ok()
    }

    /// Buffered messages in delivery order
    pub fn take_messages(&self) -> Vec<Value> {
        std::mem::take(&mut self.state.lock().messages)
    }

    fn accept(state: &mut BufferState, message: Value) {
        let key = message.get("id").map(id_key);
        if let Some(key) = key {
            state.pending.remove(&key);
            if state.ignored.contains(&key) {
                debug!(id = %key, "Dropping ignored response");
                return;
            }
        }
        state.messages.push(message);
    }
}

impl MessageSink for PendingResponses {
    fn deliver(&self, message: Value) {
        let drained = {
            let mut state = self.state.lock();
            match message {
                Value::Array(batch) => {
                    for item in batch {
                        Self::accept(&mut state, item);
                    }
                }
                other => Self::accept(&mut state, other),
            }
            state.pending.is_empty()
        };
        if drained {
            self.settled.notify_one();
        }
    }
}
