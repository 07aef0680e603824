//! Article envelope, read-model, and DTO types.

use scribe_core::types::{Timestamp, UserId, VersionNumber};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::attachment::Attachment;

/// A row from the `articles` table: the mutable envelope.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleEnvelope {
    pub id: String,
    pub workspace_id: String,
    pub created_by: Option<UserId>,
    pub current_version: VersionNumber,
    #[sqlx(json)]
    pub attachments: Vec<Attachment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// An article as read: the envelope joined with one snapshot.
///
/// `version` is the snapshot being shown; `latest_version` is the envelope's
/// current pointer so a reader of history can always navigate back.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Article {
    pub id: String,
    pub workspace_id: String,
    pub created_by: Option<UserId>,
    pub title: String,
    pub content: String,
    pub version: VersionNumber,
    pub latest_version: VersionNumber,
    pub is_latest: bool,
    #[sqlx(json)]
    pub attachments: Vec<Attachment>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// List projection: envelope plus the current snapshot's title.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ArticleSummary {
    pub id: String,
    pub title: String,
    pub workspace_id: String,
    pub created_by: Option<UserId>,
    pub version: VersionNumber,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an article.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateArticle {
    pub title: String,
    pub content: String,
    #[serde(alias = "workspaceId")]
    pub workspace_id: String,
}

/// DTO for editing an article. Every accepted edit produces a new version.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateArticle {
    pub title: String,
    pub content: String,
    /// Move the article to another workspace.
    #[serde(default, alias = "workspaceId")]
    pub workspace_id: Option<String>,
    /// The version the client edited from. When set, the update is rejected
    /// if the article has moved on since.
    #[serde(default, alias = "baseVersion")]
    pub base_version: Option<VersionNumber>,
}
