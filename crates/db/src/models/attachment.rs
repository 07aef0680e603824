//! Attachment metadata stored in the `articles.attachments` JSONB array.

use scribe_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file bound to an article envelope (shared by every version).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: Uuid,
    /// Storage-local file name.
    pub file_name: String,
    /// Name the client uploaded the file as.
    pub original_name: String,
    pub mime_type: String,
    pub size: i64,
    pub url: String,
    pub created_at: Timestamp,
}
