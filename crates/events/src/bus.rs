//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>`. Publishing never blocks and
//! never fails: with zero subscribers the event is dropped.

use chrono::Utc;
use scribe_core::types::Timestamp;
use scribe_db::models::attachment::Attachment;
use serde::Serialize;
use tokio::sync::broadcast;

// ---------------------------------------------------------------------------
// ArticleEvent
// ---------------------------------------------------------------------------

/// A notification about a committed article mutation.
///
/// Serialized with a `type` tag and camelCase fields, e.g.
/// `{"type":"articleUpdated","articleId":"...","title":"...","timestamp":"..."}`.
/// A nested `attachment` keeps the same shape as in the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum ArticleEvent {
    /// The article gained a version or lost an attachment.
    ArticleUpdated {
        article_id: String,
        title: String,
        timestamp: Timestamp,
    },
    /// A file was attached to the article.
    AttachmentAdded {
        article_id: String,
        title: String,
        attachment: Attachment,
        timestamp: Timestamp,
    },
}

impl ArticleEvent {
    pub fn article_updated(article_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self::ArticleUpdated {
            article_id: article_id.into(),
            title: title.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn attachment_added(
        article_id: impl Into<String>,
        title: impl Into<String>,
        attachment: Attachment,
    ) -> Self {
        Self::AttachmentAdded {
            article_id: article_id.into(),
            title: title.into(),
            attachment,
            timestamp: Utc::now(),
        }
    }

    /// The wire name carried in the `type` field.
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::ArticleUpdated { .. } => "articleUpdated",
            Self::AttachmentAdded { .. } => "attachmentAdded",
        }
    }

    pub fn article_id(&self) -> &str {
        match self {
            Self::ArticleUpdated { article_id, .. } | Self::AttachmentAdded { article_id, .. } => {
                article_id
            }
        }
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 1024;

/// In-process fan-out event bus.
///
/// Wraps a [`broadcast::Sender`] so that any number of subscribers can
/// independently receive every published [`ArticleEvent`].
///
/// # Usage
///
/// ```rust
/// use scribe_events::bus::{ArticleEvent, EventBus};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(ArticleEvent::article_updated("hello-202410191342", "Hello"));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<ArticleEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// When the buffer is full, the oldest un-consumed messages are dropped
    /// and slow receivers will observe a `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all current subscribers.
    pub fn publish(&self, event: ArticleEvent) {
        match self.sender.send(event) {
            Ok(receivers) => tracing::debug!(receivers, "Published article event"),
            // Zero receivers.
            Err(_) => tracing::trace!("Dropped article event with no subscribers"),
        }
    }

    /// Subscribe to all events published on this bus.
    pub fn subscribe(&self) -> broadcast::Receiver<ArticleEvent> {
        self.sender.subscribe()
    }

    /// Number of live receivers.
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
