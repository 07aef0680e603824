//! Article mutation orchestrator.
//!
//! Owns the transaction boundary for versioned writes: each `create` and
//! `update` writes a snapshot and moves the envelope pointer inside one
//! PostgreSQL transaction, then publishes a notification after commit.
//! Attachment uploads span two systems (byte store and database) and are
//! run as a write-then-record sequence with a compensating delete.
//! Held in [`AppState`](crate::state::AppState) as an
//! `Arc<ArticleOrchestrator>`.

use std::sync::Arc;

use chrono::Utc;
use scribe_core::article::{
    derive_article_id, id_with_suffix, validate_draft, validate_version, FIRST_VERSION,
    MAX_ID_ATTEMPTS,
};
use scribe_core::attachment::attachment_url;
use scribe_core::blob::BlobStore;
use scribe_core::error::CoreError;
use scribe_core::types::{UserId, VersionNumber};
use scribe_core::workspace::validate_workspace_id;
use scribe_db::models::article::{Article, ArticleSummary, CreateArticle, UpdateArticle};
use scribe_db::models::article_version::VersionSummary;
use scribe_db::models::attachment::Attachment;
use scribe_db::repositories::{ArticleRepo, ArticleVersionRepo, AttachmentRepo, WorkspaceRepo};
use scribe_db::DbPool;
use scribe_events::{ArticleEvent, EventBus};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// An accepted upload, already checked against the MIME and size policy.
#[derive(Debug)]
pub struct NewAttachment {
    pub original_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Coordinates the versioning store, attachment ledger, byte storage and
/// notification bus.
///
/// Authorization is the caller's job: `update`, `delete`, `attach` and
/// `detach` assume the acting user has already passed `can_edit`.
pub struct ArticleOrchestrator {
    pool: DbPool,
    blobs: Arc<dyn BlobStore>,
    events: Arc<EventBus>,
}

impl ArticleOrchestrator {
    pub fn new(pool: DbPool, blobs: Arc<dyn BlobStore>, events: Arc<EventBus>) -> Self {
        Self {
            pool,
            blobs,
            events,
        }
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// Fetch an article at `version`, or at its current version.
    pub async fn get(&self, id: &str, version: Option<VersionNumber>) -> AppResult<Article> {
        if let Some(v) = version {
            validate_version(v)?;
        }
        ArticleRepo::find(&self.pool, id, version)
            .await?
            .ok_or_else(|| match version {
                Some(v) => CoreError::not_found("Article version", format!("{id}@{v}")),
                None => CoreError::not_found("Article", id),
            })
            .map_err(AppError::Core)
    }

    /// Articles of one workspace, newest first, optionally filtered by a
    /// search term against the current version.
    pub async fn list(
        &self,
        workspace_id: &str,
        search: Option<&str>,
    ) -> AppResult<Vec<ArticleSummary>> {
        if !WorkspaceRepo::exists(&self.pool, workspace_id).await? {
            return Err(CoreError::not_found("Workspace", workspace_id).into());
        }
        Ok(ArticleRepo::list(&self.pool, workspace_id, search).await?)
    }

    /// Version history, newest first.
    pub async fn list_versions(&self, id: &str) -> AppResult<Vec<VersionSummary>> {
        let versions = ArticleVersionRepo::list_for_article(&self.pool, id).await?;
        if versions.is_empty() {
            return Err(CoreError::not_found("Article", id).into());
        }
        Ok(versions)
    }

    // -----------------------------------------------------------------------
    // Versioned writes
    // -----------------------------------------------------------------------

    /// Create an article: envelope at version 1 plus snapshot 1, atomically.
    ///
    /// The id is derived from the title and creation minute; if it is taken
    /// the next free `-2`, `-3`, ... suffix is used.
    pub async fn create(
        &self,
        input: &CreateArticle,
        created_by: Option<UserId>,
    ) -> AppResult<Article> {
        validate_draft(&input.title, &input.content)?;
        validate_workspace_id(&input.workspace_id)?;
        let title = input.title.trim();
        let content = input.content.trim();
        let workspace_id = input.workspace_id.trim();
        self.ensure_workspace(workspace_id).await?;

        let base_id = derive_article_id(title, Utc::now());

        let mut tx = self.pool.begin().await?;

        let mut envelope = None;
        for attempt in 0..MAX_ID_ATTEMPTS {
            let candidate = id_with_suffix(&base_id, attempt);
            envelope =
                ArticleRepo::insert_envelope(&mut *tx, &candidate, workspace_id, created_by)
                    .await?;
            if envelope.is_some() {
                break;
            }
            tracing::debug!(article_id = %candidate, "Article id taken, trying next suffix");
        }
        let envelope = envelope.ok_or_else(|| {
            CoreError::Conflict(format!("Could not allocate an id for '{base_id}'"))
        })?;

        ArticleVersionRepo::insert(
            &mut *tx,
            &envelope.id,
            FIRST_VERSION,
            title,
            content,
            workspace_id,
        )
        .await?;

        let article = ArticleRepo::find_current_in(&mut *tx, &envelope.id)
            .await?
            .ok_or_else(|| {
                CoreError::Internal(format!("Created article {} vanished", envelope.id))
            })?;

        tx.commit().await?;

        tracing::info!(
            article_id = %article.id,
            version = article.version,
            workspace_id = %article.workspace_id,
            user_id = ?created_by,
            "Article created"
        );
        Ok(article)
    }

    /// Write snapshot N+1 and advance the envelope to it, atomically.
    ///
    /// The envelope row is locked for the duration, so concurrent updates of
    /// one article queue up and each gets its own version number. When
    /// `base_version` is given and the article has moved past it, nothing is
    /// written and `Conflict` is returned.
    pub async fn update(&self, id: &str, input: &UpdateArticle) -> AppResult<Article> {
        validate_draft(&input.title, &input.content)?;
        let title = input.title.trim();
        let content = input.content.trim();
        let target_workspace = match input.workspace_id.as_deref() {
            Some(ws) => {
                validate_workspace_id(ws)?;
                let ws = ws.trim();
                self.ensure_workspace(ws).await?;
                Some(ws)
            }
            None => None,
        };

        let mut tx = self.pool.begin().await?;

        let envelope = ArticleRepo::lock_envelope(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::not_found("Article", id))?;

        if let Some(base) = input.base_version {
            if base != envelope.current_version {
                return Err(CoreError::Conflict(format!(
                    "Article {id} is at version {}, edit was based on version {base}",
                    envelope.current_version
                ))
                .into());
            }
        }

        let next = envelope.current_version + 1;
        let workspace_id = target_workspace.unwrap_or(&envelope.workspace_id);

        ArticleVersionRepo::insert(&mut *tx, id, next, title, content, workspace_id).await?;

        ArticleRepo::advance_version(&mut *tx, id, next, workspace_id)
            .await?
            .ok_or_else(|| {
                CoreError::Conflict(format!("Article {id} was modified concurrently"))
            })?;

        let article = ArticleRepo::find_current_in(&mut *tx, id)
            .await?
            .ok_or_else(|| CoreError::Internal(format!("Updated article {id} vanished")))?;

        tx.commit().await?;

        tracing::info!(
            article_id = %article.id,
            version = article.version,
            workspace_id = %article.workspace_id,
            "Article updated"
        );
        self.events
            .publish(ArticleEvent::article_updated(&article.id, &article.title));
        Ok(article)
    }

    /// Delete an article with its versions, comments and attachment metadata,
    /// then remove its stored bytes. Returns `false` if nothing was deleted.
    pub async fn delete(&self, id: &str) -> AppResult<bool> {
        let deleted = ArticleRepo::delete(&self.pool, id).await?;
        if !deleted {
            return Ok(false);
        }
        tracing::info!(article_id = %id, "Article deleted");

        if let Err(e) = self.blobs.delete_all_files_for(id).await {
            tracing::warn!(article_id = %id, error = %e, "Failed to remove attachment files");
        }
        Ok(true)
    }

    // -----------------------------------------------------------------------
    // Attachments
    // -----------------------------------------------------------------------

    /// Store the bytes, then record the metadata on the envelope.
    ///
    /// If recording fails the bytes are deleted again; a failed delete is
    /// logged and leaves an orphaned file.
    pub async fn attach(&self, article_id: &str, upload: NewAttachment) -> AppResult<Attachment> {
        let article = self.get(article_id, None).await?;

        let stored = self
            .blobs
            .write_file(article_id, &upload.original_name, &upload.bytes)
            .await
            .map_err(|e| {
                CoreError::Storage(format!("writing attachment for article {article_id}: {e}"))
            })?;

        let attachment = Attachment {
            id: Uuid::new_v4(),
            url: attachment_url(article_id, &stored.file_name),
            file_name: stored.file_name,
            original_name: upload.original_name,
            mime_type: upload.mime_type,
            size: i64::try_from(stored.size).unwrap_or(i64::MAX),
            created_at: Utc::now(),
        };

        let saved = match AttachmentRepo::add(&self.pool, article_id, &attachment).await {
            Ok(Some(saved)) => saved,
            Ok(None) => {
                self.discard_bytes(article_id, &attachment.file_name).await;
                return Err(CoreError::not_found("Article", article_id).into());
            }
            Err(e) => {
                self.discard_bytes(article_id, &attachment.file_name).await;
                return Err(e.into());
            }
        };

        tracing::info!(
            article_id = %article_id,
            attachment_id = %saved.id,
            file_name = %saved.file_name,
            size = saved.size,
            "Attachment added"
        );
        self.events.publish(ArticleEvent::attachment_added(
            article_id,
            &article.title,
            saved.clone(),
        ));
        Ok(saved)
    }

    /// Remove attachment metadata, then delete the bytes best-effort.
    pub async fn detach(&self, article_id: &str, attachment_id: Uuid) -> AppResult<Attachment> {
        let article = self.get(article_id, None).await?;

        let removed = AttachmentRepo::remove(&self.pool, article_id, attachment_id)
            .await?
            .ok_or_else(|| CoreError::not_found("Attachment", attachment_id))?;

        if let Err(e) = self.blobs.delete_file(article_id, &removed.file_name).await {
            tracing::warn!(
                article_id = %article_id,
                attachment_id = %attachment_id,
                error = %e,
                "Failed to remove attachment file"
            );
        }

        tracing::info!(article_id = %article_id, attachment_id = %attachment_id, "Attachment removed");
        self.events
            .publish(ArticleEvent::article_updated(article_id, &article.title));
        Ok(removed)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    async fn ensure_workspace(&self, workspace_id: &str) -> AppResult<()> {
        if WorkspaceRepo::exists(&self.pool, workspace_id).await? {
            Ok(())
        } else {
            Err(CoreError::Validation(format!("Workspace '{workspace_id}' does not exist")).into())
        }
    }

    /// Compensating delete for bytes whose metadata never got recorded.
    async fn discard_bytes(&self, article_id: &str, file_name: &str) {
        if let Err(e) = self.blobs.delete_file(article_id, file_name).await {
            tracing::warn!(
                article_id = %article_id,
                file_name = %file_name,
                error = %e,
                "Failed to remove orphaned attachment file"
            );
        }
    }
}
