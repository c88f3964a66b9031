//! Application state shared by every HTTP handler

use std::sync::Arc;

use crate::config::Config;
use crate::protocol::ServerInfo;
use crate::tools::SharedRegistry;

use super::sse::{InMemorySessionStore, SessionStore};

pub struct AppState {
    pub config: Config,
    pub server_info: ServerInfo,
    /// Tool catalog shared by every protocol core
    pub registry: SharedRegistry,
    /// Live SSE sessions
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    /// Create state with an in-memory session store
    pub fn new(config: Config, registry: SharedRegistry) -> Self {
        Self::with_store(config, registry, Arc::new(InMemorySessionStore::new()))
    }

    pub fn with_store(
        config: Config,
        registry: SharedRegistry,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            server_info: ServerInfo::default(),
            registry,
            sessions,
        }
    }
}
