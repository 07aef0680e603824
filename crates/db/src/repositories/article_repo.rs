//! Repository for the `articles` envelope table.
//!
//! Title and content live in `article_versions`; every read here joins the
//! envelope with exactly one snapshot. Mutating steps that belong to the
//! versioning transaction take `&mut PgConnection` so the orchestrator can
//! run them on a single transaction.

use scribe_core::types::{UserId, VersionNumber};
use sqlx::{PgConnection, PgPool};

use crate::models::article::{Article, ArticleEnvelope, ArticleSummary};

/// Column list for envelope-only queries.
const ENVELOPE_COLUMNS: &str =
    "id, workspace_id, created_by, current_version, attachments, created_at, updated_at";

/// Column list for the envelope + snapshot join (`a` = articles, `v` = article_versions).
const ARTICLE_COLUMNS: &str = "\
    a.id, a.workspace_id, a.created_by, v.title, v.content, \
    v.version, a.current_version AS latest_version, \
    (v.version = a.current_version) AS is_latest, \
    a.attachments, a.created_at, a.updated_at";

/// Provides envelope persistence and snapshot-joined reads.
pub struct ArticleRepo;

impl ArticleRepo {
    /// Insert a new envelope at version 1.
    ///
    /// Returns `None` when the id is already taken, so the caller can retry
    /// with a different id inside the same transaction.
    pub async fn insert_envelope(
        conn: &mut PgConnection,
        id: &str,
        workspace_id: &str,
        created_by: Option<UserId>,
    ) -> Result<Option<ArticleEnvelope>, sqlx::Error> {
        let query = format!(
            "INSERT INTO articles (id, workspace_id, created_by, current_version)
             VALUES ($1, $2, $3, 1)
             ON CONFLICT (id) DO NOTHING
             RETURNING {ENVELOPE_COLUMNS}"
        );
        sqlx::query_as::<_, ArticleEnvelope>(&query)
            .bind(id)
            .bind(workspace_id)
            .bind(created_by)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Lock the envelope row for the rest of the transaction.
    ///
    /// Concurrent callers block here until the holder commits or rolls back,
    /// so each one observes the version number the previous one wrote.
    pub async fn lock_envelope(
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<ArticleEnvelope>, sqlx::Error> {
        let query = format!("SELECT {ENVELOPE_COLUMNS} FROM articles WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, ArticleEnvelope>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Advance the envelope pointer to `version`, moving it to `workspace_id`.
    ///
    /// Guarded by `current_version = version - 1`; returns `None` if the
    /// pointer moved underneath the caller.
    pub async fn advance_version(
        conn: &mut PgConnection,
        id: &str,
        version: VersionNumber,
        workspace_id: &str,
    ) -> Result<Option<ArticleEnvelope>, sqlx::Error> {
        let query = format!(
            "UPDATE articles SET current_version = $2, workspace_id = $3
             WHERE id = $1 AND current_version = $2 - 1
             RETURNING {ENVELOPE_COLUMNS}"
        );
        sqlx::query_as::<_, ArticleEnvelope>(&query)
            .bind(id)
            .bind(version)
            .bind(workspace_id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// Find an envelope by id without locking.
    pub async fn find_envelope(
        pool: &PgPool,
        id: &str,
    ) -> Result<Option<ArticleEnvelope>, sqlx::Error> {
        let query = format!("SELECT {ENVELOPE_COLUMNS} FROM articles WHERE id = $1");
        sqlx::query_as::<_, ArticleEnvelope>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an article joined with the given snapshot, or its current one.
    ///
    /// Returns `None` if the article or that exact version does not exist.
    pub async fn find(
        pool: &PgPool,
        id: &str,
        version: Option<VersionNumber>,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS}
             FROM articles a
             JOIN article_versions v
               ON v.article_id = a.id AND v.version = COALESCE($2, a.current_version)
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .bind(version)
            .fetch_optional(pool)
            .await
    }

    /// Same as [`find`](Self::find) for the current version, on a transaction.
    pub async fn find_current_in(
        conn: &mut PgConnection,
        id: &str,
    ) -> Result<Option<Article>, sqlx::Error> {
        let query = format!(
            "SELECT {ARTICLE_COLUMNS}
             FROM articles a
             JOIN article_versions v
               ON v.article_id = a.id AND v.version = a.current_version
             WHERE a.id = $1"
        );
        sqlx::query_as::<_, Article>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await
    }

    /// List articles in a workspace, newest first.
    ///
    /// `search` is a case-insensitive substring match against the current
    /// snapshot's title and content only.
    pub async fn list(
        pool: &PgPool,
        workspace_id: &str,
        search: Option<&str>,
    ) -> Result<Vec<ArticleSummary>, sqlx::Error> {
        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{}%", escape_like(s)));

        sqlx::query_as::<_, ArticleSummary>(
            "SELECT a.id, v.title, a.workspace_id, a.created_by,
                    a.current_version AS version, a.created_at, a.updated_at
             FROM articles a
             JOIN article_versions v
               ON v.article_id = a.id AND v.version = a.current_version
             WHERE a.workspace_id = $1
               AND ($2::TEXT IS NULL OR v.title ILIKE $2 OR v.content ILIKE $2)
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(workspace_id)
        .bind(pattern)
        .fetch_all(pool)
        .await
    }

    /// Delete an envelope. Versions and comments go with it by cascade.
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM articles WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
