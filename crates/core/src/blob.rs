//! Durable byte storage for attachment payloads.
//!
//! [`BlobStore`] is the seam between the attachment ledger (metadata in
//! PostgreSQL) and wherever the bytes live. The two never share a
//! transaction: callers write bytes first, persist metadata second, and
//! delete the bytes again if the metadata write fails.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::attachment::storage_file_name;

/// Errors raised by a [`BlobStore`].
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("Invalid storage name: {0}")]
    InvalidName(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Reference to bytes written by [`BlobStore::write_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredBlob {
    /// Storage-local file name, unique within the article.
    pub file_name: String,
    /// Number of bytes written.
    pub size: u64,
}

/// Byte storage keyed by article id and storage-local file name.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Write `bytes` under a fresh storage-local name derived from
    /// `original_name`'s extension.
    async fn write_file(
        &self,
        article_id: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredBlob, BlobError>;

    /// Delete one stored file. Deleting a file that is already gone succeeds.
    async fn delete_file(&self, article_id: &str, file_name: &str) -> Result<(), BlobError>;

    /// Delete every file stored for an article.
    async fn delete_all_files_for(&self, article_id: &str) -> Result<(), BlobError>;
}

// ---------------------------------------------------------------------------
// Local filesystem implementation
// ---------------------------------------------------------------------------

/// Stores files at `<root>/<article_id>/<file_name>`.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn article_dir(&self, article_id: &str) -> Result<PathBuf, BlobError> {
        ensure_plain_segment(article_id)?;
        Ok(self.root.join(article_id))
    }
}

/// Reject anything that could escape the article directory.
fn ensure_plain_segment(segment: &str) -> Result<(), BlobError> {
    if segment.is_empty()
        || segment == "."
        || segment == ".."
        || segment.contains(['/', '\\', '\0'])
    {
        return Err(BlobError::InvalidName(segment.to_string()));
    }
    Ok(())
}

fn io_err(path: &Path, source: std::io::Error) -> BlobError {
    BlobError::Io {
        path: path.display().to_string(),
        source,
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn write_file(
        &self,
        article_id: &str,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StoredBlob, BlobError> {
        let dir = self.article_dir(article_id)?;
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| io_err(&dir, e))?;

        let file_name = storage_file_name(original_name);
        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| io_err(&path, e))?;

        tracing::debug!(article_id, file_name = %file_name, size = bytes.len(), "Stored attachment bytes");
        Ok(StoredBlob {
            file_name,
            size: bytes.len() as u64,
        })
    }

    async fn delete_file(&self, article_id: &str, file_name: &str) -> Result<(), BlobError> {
        ensure_plain_segment(file_name)?;
        let path = self.article_dir(article_id)?.join(file_name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&path, e)),
        }
    }

    async fn delete_all_files_for(&self, article_id: &str) -> Result<(), BlobError> {
        let dir = self.article_dir(article_id)?;
        match tokio::fs::remove_dir_all(&dir).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_err(&dir, e)),
        }
    }
}
