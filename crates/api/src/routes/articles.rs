//! Route definitions for articles and their sub-resources.
//!
//! Registered under `/api/articles`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::{articles, attachments, comments};
use crate::state::AppState;

/// Slack on top of the file size for multipart boundaries and headers.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Article routes.
///
/// ```text
/// GET    /                                   list_articles
/// POST   /                                   create_article
/// GET    /{id}                               get_article (?version=N)
/// PUT    /{id}                               update_article
/// DELETE /{id}                               delete_article
/// GET    /{id}/versions                      list_versions
/// GET    /{id}/export                        export_article (?version=N)
/// POST   /{id}/attachments                   upload_attachment
/// DELETE /{id}/attachments/{attachment_id}   delete_attachment
/// GET    /{id}/comments                      list_comments
/// POST   /{id}/comments                      create_comment
/// PUT    /{id}/comments/{comment_id}         update_comment
/// DELETE /{id}/comments/{comment_id}         delete_comment
/// ```
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(articles::list_articles).post(articles::create_article),
        )
        .route(
            "/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/{id}/versions", get(articles::list_versions))
        .route("/{id}/export", get(articles::export_article))
        .route(
            "/{id}/attachments",
            post(attachments::upload_attachment).layer(DefaultBodyLimit::max(
                max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
            )),
        )
        .route(
            "/{id}/attachments/{attachment_id}",
            delete(attachments::delete_attachment),
        )
        .route(
            "/{id}/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/{id}/comments/{comment_id}",
            put(comments::update_comment).delete(comments::delete_comment),
        )
}
