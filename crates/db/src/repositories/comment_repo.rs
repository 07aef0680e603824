//! Repository for the `comments` table.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::comment::Comment;

const COLUMNS: &str = "id, article_id, author, body, created_at, updated_at";

/// Flat CRUD keyed by `(article_id, comment_id)`. No authorization here.
pub struct CommentRepo;

impl CommentRepo {
    /// Comments on an article, oldest first.
    pub async fn list_for_article(
        pool: &PgPool,
        article_id: &str,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM comments WHERE article_id = $1 ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .fetch_all(pool)
            .await
    }

    pub async fn find(
        pool: &PgPool,
        article_id: &str,
        id: Uuid,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM comments WHERE article_id = $1 AND id = $2");
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a comment. Fails with a foreign-key violation if the article
    /// does not exist.
    pub async fn create(
        pool: &PgPool,
        article_id: &str,
        author: Option<&str>,
        body: &str,
    ) -> Result<Comment, sqlx::Error> {
        let query = format!(
            "INSERT INTO comments (id, article_id, author, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(Uuid::new_v4())
            .bind(article_id)
            .bind(author)
            .bind(body)
            .fetch_one(pool)
            .await
    }

    /// Replace a comment's author and body. Returns `None` if not found.
    pub async fn update(
        pool: &PgPool,
        article_id: &str,
        id: Uuid,
        author: Option<&str>,
        body: &str,
    ) -> Result<Option<Comment>, sqlx::Error> {
        let query = format!(
            "UPDATE comments SET author = $3, body = $4
             WHERE article_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(article_id)
            .bind(id)
            .bind(author)
            .bind(body)
            .fetch_optional(pool)
            .await
    }

    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, article_id: &str, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE article_id = $1 AND id = $2")
            .bind(article_id)
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
