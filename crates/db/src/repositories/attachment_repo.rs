//! Attachment ledger over the `articles.attachments` JSONB array.
//!
//! The ledger only persists metadata. Writing and deleting the bytes is the
//! caller's job; see `scribe_core::blob`.

use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::attachment::Attachment;

pub struct AttachmentRepo;

impl AttachmentRepo {
    /// Append an attachment to the envelope's list.
    ///
    /// A single statement, so concurrent appends to the same article are
    /// serialized by the row lock `UPDATE` takes. Returns `None` if the
    /// article does not exist.
    pub async fn add(
        pool: &PgPool,
        article_id: &str,
        attachment: &Attachment,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE articles
             SET attachments = attachments || jsonb_build_array($2::jsonb)
             WHERE id = $1",
        )
        .bind(article_id)
        .bind(Json(attachment))
        .execute(pool)
        .await?;

        Ok((result.rows_affected() > 0).then(|| attachment.clone()))
    }

    /// Remove an attachment by id and return the removed record.
    ///
    /// Returns `None`, leaving the list untouched, when either the article or
    /// the attachment does not exist.
    pub async fn remove(
        pool: &PgPool,
        article_id: &str,
        attachment_id: Uuid,
    ) -> Result<Option<Attachment>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let current: Option<(Json<Vec<Attachment>>,)> =
            sqlx::query_as("SELECT attachments FROM articles WHERE id = $1 FOR UPDATE")
                .bind(article_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((Json(mut attachments),)) = current else {
            return Ok(None);
        };
        let Some(pos) = attachments.iter().position(|a| a.id == attachment_id) else {
            return Ok(None);
        };
        let removed = attachments.remove(pos);

        sqlx::query("UPDATE articles SET attachments = $2 WHERE id = $1")
            .bind(article_id)
            .bind(Json(&attachments))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(Some(removed))
    }

    /// The envelope's attachments in insertion order. `None` if the article
    /// does not exist.
    pub async fn list(
        pool: &PgPool,
        article_id: &str,
    ) -> Result<Option<Vec<Attachment>>, sqlx::Error> {
        let row: Option<(Json<Vec<Attachment>>,)> =
            sqlx::query_as("SELECT attachments FROM articles WHERE id = $1")
                .bind(article_id)
                .fetch_optional(pool)
                .await?;
        Ok(row.map(|(Json(list),)| list))
    }
}
