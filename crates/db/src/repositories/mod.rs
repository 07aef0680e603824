//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` (or `&mut PgConnection` for transaction steps) as the first
//! argument.

pub mod article_repo;
pub mod article_version_repo;
pub mod attachment_repo;
pub mod comment_repo;
pub mod workspace_repo;

pub use article_repo::ArticleRepo;
pub use article_version_repo::ArticleVersionRepo;
pub use attachment_repo::AttachmentRepo;
pub use comment_repo::CommentRepo;
pub use workspace_repo::WorkspaceRepo;
