//! Application state management

use std::sync::Arc;

use sociograph::directory::InMemoryUserDirectory;
use sociograph::service::RelationshipService;

use crate::api::sessions::SessionStore;
use crate::config::ServerConfig;

/// Application state shared across all handlers
pub struct AppState {
    /// The relationship graph subsystem
    pub service: RelationshipService,

    /// User directory (also reachable through the service; typed
    /// concretely here so the binary and tests can seed it)
    pub directory: Arc<InMemoryUserDirectory>,

    /// Session token store
    pub sessions: Arc<dyn SessionStore>,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(
        service: RelationshipService,
        directory: Arc<InMemoryUserDirectory>,
        sessions: Arc<dyn SessionStore>,
        config: ServerConfig,
    ) -> Self {
        Self {
            service,
            directory,
            sessions,
            config,
        }
    }
}
