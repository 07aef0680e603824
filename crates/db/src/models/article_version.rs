//! Immutable article snapshot models.

use scribe_core::types::{Timestamp, VersionNumber};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `article_versions` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct ArticleVersion {
    pub article_id: String,
    pub version: VersionNumber,
    pub title: String,
    pub content: String,
    pub workspace_id: String,
    pub created_at: Timestamp,
}

/// One entry of an article's version history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VersionSummary {
    pub version: VersionNumber,
    pub title: String,
    pub content: String,
    pub workspace_id: String,
    pub created_at: Timestamp,
}
