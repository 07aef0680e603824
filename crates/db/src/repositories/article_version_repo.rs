//! Repository for the append-only `article_versions` table.

use scribe_core::types::VersionNumber;
use sqlx::{PgConnection, PgPool};

use crate::models::article_version::{ArticleVersion, VersionSummary};

const COLUMNS: &str = "article_id, version, title, content, workspace_id, created_at";

/// Snapshots are inserted, never updated; a trigger rejects `UPDATE`.
pub struct ArticleVersionRepo;

impl ArticleVersionRepo {
    /// Write a snapshot. Must run in the same transaction that advances the
    /// envelope pointer.
    pub async fn insert(
        conn: &mut PgConnection,
        article_id: &str,
        version: VersionNumber,
        title: &str,
        content: &str,
        workspace_id: &str,
    ) -> Result<ArticleVersion, sqlx::Error> {
        let query = format!(
            "INSERT INTO article_versions (article_id, version, title, content, workspace_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(article_id)
            .bind(version)
            .bind(title)
            .bind(content)
            .bind(workspace_id)
            .fetch_one(&mut *conn)
            .await
    }

    /// Find one snapshot.
    pub async fn find(
        pool: &PgPool,
        article_id: &str,
        version: VersionNumber,
    ) -> Result<Option<ArticleVersion>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM article_versions WHERE article_id = $1 AND version = $2");
        sqlx::query_as::<_, ArticleVersion>(&query)
            .bind(article_id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    /// Version history, newest first. Empty when the article does not exist.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: &str,
    ) -> Result<Vec<VersionSummary>, sqlx::Error> {
        sqlx::query_as::<_, VersionSummary>(
            "SELECT version, title, content, workspace_id, created_at
             FROM article_versions
             WHERE article_id = $1
             ORDER BY version DESC",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await
    }

    /// All version numbers for an article, ascending.
    pub async fn version_numbers(
        pool: &PgPool,
        article_id: &str,
    ) -> Result<Vec<VersionNumber>, sqlx::Error> {
        let rows: Vec<(VersionNumber,)> = sqlx::query_as(
            "SELECT version FROM article_versions WHERE article_id = $1 ORDER BY version ASC",
        )
        .bind(article_id)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(|(v,)| v).collect())
    }
}
