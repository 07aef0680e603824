use std::sync::Arc;

use scribe_core::blob::BlobStore;
use scribe_events::EventBus;

use crate::config::ServerConfig;
use crate::orchestrator::ArticleOrchestrator;
use crate::ws::WsManager;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: scribe_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// WebSocket connection manager (browser clients).
    pub ws_manager: Arc<WsManager>,
    /// Notification bus; the orchestrator publishes, the relay forwards to sockets.
    pub event_bus: Arc<EventBus>,
    /// Transactional article mutations.
    pub articles: Arc<ArticleOrchestrator>,
}

impl AppState {
    /// Wire the orchestrator to the same pool, bus and byte store the state exposes.
    pub fn new(
        pool: scribe_db::DbPool,
        config: Arc<ServerConfig>,
        ws_manager: Arc<WsManager>,
        event_bus: Arc<EventBus>,
        blobs: Arc<dyn BlobStore>,
    ) -> Self {
        let articles = Arc::new(ArticleOrchestrator::new(
            pool.clone(),
            blobs,
            Arc::clone(&event_bus),
        ));
        Self {
            pool,
            config,
            ws_manager,
            event_bus,
            articles,
        }
    }
}
