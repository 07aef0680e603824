//! Event-to-WebSocket fan-out.
//!
//! [`NotificationRelay`] subscribes to the [`EventBus`](scribe_events::EventBus)
//! and pushes every [`ArticleEvent`] as a JSON text frame to every connected
//! client. There is no acknowledgement and no replay: a client that is not
//! connected when an event fires never sees it.

use std::sync::Arc;

use axum::extract::ws::Message;
use scribe_events::ArticleEvent;
use tokio::sync::broadcast;

use crate::ws::WsManager;

pub struct NotificationRelay {
    ws_manager: Arc<WsManager>,
}

impl NotificationRelay {
    pub fn new(ws_manager: Arc<WsManager>) -> Self {
        Self { ws_manager }
    }

    /// Run the relay loop.
    ///
    /// The loop exits when the channel is closed (i.e. the
    /// [`EventBus`](scribe_events::EventBus) is dropped).
    pub async fn run(self, mut receiver: broadcast::Receiver<ArticleEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => self.forward(&event).await,
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Notification relay lagged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, notification relay shutting down");
                    break;
                }
            }
        }
    }

    /// Serialize one event and broadcast it to all sockets.
    pub async fn forward(&self, event: &ArticleEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, event_type = event.event_type(), "Failed to serialize event");
                return;
            }
        };
        let delivered = self.ws_manager.broadcast(Message::Text(payload.into())).await;
        tracing::debug!(
            event_type = event.event_type(),
            article_id = %event.article_id(),
            delivered,
            "Relayed article event"
        );
    }
}
