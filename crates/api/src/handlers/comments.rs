//! Handlers for the comment sub-resource.
//!
//! Comments belong to the article envelope and are shared by all versions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scribe_core::comment::{normalize_author, validate_body};
use scribe_core::error::CoreError;
use scribe_db::models::comment::CommentInput;
use scribe_db::repositories::CommentRepo;

use crate::error::{AppError, AppResult};
use crate::extract::{parse_resource_id, AppJson};
use crate::handlers::articles::ensure_envelope;
use crate::response::DataResponse;
use crate::state::AppState;

/// Validate and normalize a comment payload into `(author, body)`.
fn clean_input(input: &CommentInput) -> AppResult<(Option<String>, String)> {
    validate_body(&input.body)?;
    let author = normalize_author(input.author.as_deref())?;
    Ok((author, input.body.trim().to_string()))
}

/// GET /articles/{id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    ensure_envelope(&state.pool, &id).await?;
    let comments = CommentRepo::list_for_article(&state.pool, &id).await?;
    Ok(Json(DataResponse { data: comments }))
}

/// POST /articles/{id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<CommentInput>,
) -> AppResult<impl IntoResponse> {
    let (author, body) = clean_input(&input)?;
    ensure_envelope(&state.pool, &id).await?;

    let comment = CommentRepo::create(&state.pool, &id, author.as_deref(), &body).await?;
    tracing::info!(article_id = %id, comment_id = %comment.id, "Comment created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// PUT /articles/{id}/comments/{comment_id}
pub async fn update_comment(
    State(state): State<AppState>,
    Path((id, raw_comment_id)): Path<(String, String)>,
    AppJson(input): AppJson<CommentInput>,
) -> AppResult<impl IntoResponse> {
    let (author, body) = clean_input(&input)?;
    ensure_envelope(&state.pool, &id).await?;
    let comment_id = parse_resource_id("Comment", &raw_comment_id)?;

    let comment = CommentRepo::update(&state.pool, &id, comment_id, author.as_deref(), &body)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Comment", comment_id)))?;
    tracing::info!(article_id = %id, comment_id = %comment_id, "Comment updated");
    Ok(Json(DataResponse { data: comment }))
}

/// DELETE /articles/{id}/comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    Path((id, raw_comment_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    ensure_envelope(&state.pool, &id).await?;
    let comment_id = parse_resource_id("Comment", &raw_comment_id)?;

    if !CommentRepo::delete(&state.pool, &id, comment_id).await? {
        return Err(AppError::Core(CoreError::not_found("Comment", comment_id)));
    }
    tracing::info!(article_id = %id, comment_id = %comment_id, "Comment deleted");
    Ok(StatusCode::NO_CONTENT)
}
