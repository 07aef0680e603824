//! Repository for the `workspaces` table.

use scribe_core::workspace::{
    workspace_id_candidate, DEFAULT_WORKSPACE_ID, DEFAULT_WORKSPACE_NAME,
};
use sqlx::PgPool;

use crate::models::workspace::Workspace;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, created_at, updated_at";

/// Upper bound on suffixed ids tried by [`WorkspaceRepo::create_unique`].
const MAX_ID_ATTEMPTS: u32 = 100;

/// Provides lookup and creation for workspaces.
pub struct WorkspaceRepo;

impl WorkspaceRepo {
    /// Whether a workspace with the given id exists.
    pub async fn exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let row: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM workspaces WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(row.0)
    }

    /// Find a workspace by id.
    pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces WHERE id = $1");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all workspaces, oldest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<Workspace>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM workspaces ORDER BY created_at ASC, id ASC");
        sqlx::query_as::<_, Workspace>(&query).fetch_all(pool).await
    }

    /// Insert a workspace with exactly this id. Returns `None` if the id is taken.
    pub async fn create(
        pool: &PgPool,
        id: &str,
        name: &str,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!(
            "INSERT INTO workspaces (id, name) VALUES ($1, $2)
             ON CONFLICT (id) DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Insert a workspace at `base_id`, or `base_id-1`, `base_id-2`, ... if
    /// taken. Returns `None` only when every attempt clashed.
    pub async fn create_unique(
        pool: &PgPool,
        base_id: &str,
        name: &str,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        for attempt in 0..MAX_ID_ATTEMPTS {
            let id = workspace_id_candidate(base_id, attempt);
            if let Some(workspace) = Self::create(pool, &id, name).await? {
                return Ok(Some(workspace));
            }
        }
        Ok(None)
    }

    /// Rename a workspace. Returns `None` if it does not exist.
    pub async fn rename(
        pool: &PgPool,
        id: &str,
        name: &str,
    ) -> Result<Option<Workspace>, sqlx::Error> {
        let query = format!("UPDATE workspaces SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Workspace>(&query)
            .bind(id)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// Make sure the `default` workspace exists and return it.
    pub async fn ensure_default(pool: &PgPool) -> Result<Workspace, sqlx::Error> {
        if let Some(created) = Self::create(pool, DEFAULT_WORKSPACE_ID, DEFAULT_WORKSPACE_NAME).await? {
            tracing::info!(workspace_id = %created.id, "Created default workspace");
            return Ok(created);
        }
        Self::find_by_id(pool, DEFAULT_WORKSPACE_ID)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }
}
