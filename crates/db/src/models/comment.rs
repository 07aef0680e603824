//! Comment models.

use scribe_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A row from the `comments` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: String,
    pub author: Option<String>,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or editing a comment.
#[derive(Debug, Deserialize)]
pub struct CommentInput {
    pub author: Option<String>,
    pub body: String,
}
