pub mod articles;
pub mod health;
pub mod workspaces;

use axum::Router;

use crate::state::AppState;

/// All JSON API routes, mounted under `/api`.
///
/// ```text
/// /health                 health
/// /articles               articles, versions, export, attachments, comments
/// /workspaces             workspaces
/// ```
///
/// `max_upload_bytes` sizes the request body limit on the upload route.
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/articles", articles::router(max_upload_bytes))
        .nest("/workspaces", workspaces::router())
}
