//! Session management for SSE connections

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::{mpsc, RwLock};
use uuid::Uuid;

/// Lifecycle of one SSE session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    Connected,
    Closed,
}

/// Cheap, cloneable reference to a live session
///
/// Holds the sending half of the session's inbound queue. The worker exits
/// once every handle is gone.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    id: String,
    inbound: mpsc::UnboundedSender<Value>,
    phase: Arc<Mutex<SessionPhase>>,
    connected_at: i64,
}

impl SessionHandle {
    /// Create a handle with a fresh UUID v4 session id
    pub fn new(inbound: mpsc::UnboundedSender<Value>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            inbound,
            phase: Arc::new(Mutex::new(SessionPhase::Created)),
            connected_at: chrono::Utc::now().timestamp(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Seconds since the session was opened
    pub fn age_secs(&self) -> i64 {
        chrono::Utc::now().timestamp() - self.connected_at
    }

    pub fn phase(&self) -> SessionPhase {
        *self.phase.lock()
    }

    pub fn mark_connected(&self) {
        let mut phase = self.phase.lock();
        if *phase == SessionPhase::Created {
            *phase = SessionPhase::Connected;
        }
    }

    /// Closed is terminal
    pub fn close(&self) {
        *self.phase.lock() = SessionPhase::Closed;
    }

    pub fn is_closed(&self) -> bool {
        self.phase() == SessionPhase::Closed
    }

    /// Queue a body for the session worker; false once the session is gone
    pub fn enqueue(&self, body: Value) -> bool {
        !self.is_closed() && self.inbound.send(body).is_ok()
    }
}

/// Map from session id to live session
///
/// Shared by the stream handler, the message handler, and stream-drop
/// cleanup. Implementations backed by a shared cache must provide their own
/// locking.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Option<SessionHandle>;

    async fn set(&self, handle: SessionHandle);

    async fn delete(&self, session_id: &str) -> Option<SessionHandle>;

    /// Active session count
    async fn len(&self) -> usize;
}

/// Process-local session store
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.read().await.get(session_id).cloned()
    }

    async fn set(&self, handle: SessionHandle) {
        self.sessions
            .write()
            .await
            .insert(handle.id().to_string(), handle);
    }

    async fn delete(&self, session_id: &str) -> Option<SessionHandle> {
        self.sessions.write().await.remove(session_id)
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
