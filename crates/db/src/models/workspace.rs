//! Workspace (tenant) models.

use scribe_core::types::Timestamp;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `workspaces` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Workspace {
    pub id: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a workspace. The id is derived from the name when omitted.
#[derive(Debug, Deserialize)]
pub struct CreateWorkspace {
    pub id: Option<String>,
    pub name: String,
}

/// DTO for renaming a workspace.
#[derive(Debug, Deserialize)]
pub struct UpdateWorkspace {
    pub name: String,
}
