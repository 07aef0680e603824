//! Handlers for articles and their version history.
//!
//! Reads are public. Writes require an authenticated user, and `update` and
//! `delete` additionally require the article's creator or an admin.

use axum::extract::{Path, Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::export::{export_file_name, render_plain_text, ExportDocument};
use scribe_core::types::VersionNumber;
use scribe_core::workspace::DEFAULT_WORKSPACE_ID;
use scribe_db::models::article::{ArticleEnvelope, CreateArticle, UpdateArticle};
use scribe_db::repositories::ArticleRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/* --------------------------------------------------------------------------
Query param types
-------------------------------------------------------------------------- */

#[derive(Debug, Deserialize)]
pub struct ListArticlesParams {
    #[serde(alias = "workspaceId")]
    pub workspace_id: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VersionParams {
    /// Kept as text so a malformed value yields our own 400 body.
    pub version: Option<String>,
}

impl VersionParams {
    fn parse(&self) -> AppResult<Option<VersionNumber>> {
        match self.version.as_deref() {
            None => Ok(None),
            Some(raw) => raw
                .trim()
                .parse::<VersionNumber>()
                .map(Some)
                .map_err(|_| AppError::BadRequest("Invalid version number".into())),
        }
    }
}

/* --------------------------------------------------------------------------
Helpers
-------------------------------------------------------------------------- */

/// Fetch the envelope or return 404.
pub(crate) async fn ensure_envelope(pool: &sqlx::PgPool, id: &str) -> AppResult<ArticleEnvelope> {
    ArticleRepo::find_envelope(pool, id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Article", id)))
}

/* --------------------------------------------------------------------------
Reads
-------------------------------------------------------------------------- */

/// GET /articles?workspaceId=&search=
///
/// Defaults to the `default` workspace.
pub async fn list_articles(
    State(state): State<AppState>,
    Query(params): Query<ListArticlesParams>,
) -> AppResult<impl IntoResponse> {
    let workspace_id = params
        .workspace_id
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(DEFAULT_WORKSPACE_ID);

    let articles = state
        .articles
        .list(workspace_id, params.search.as_deref())
        .await?;
    Ok(Json(DataResponse { data: articles }))
}

/// GET /articles/{id}?version=N
pub async fn get_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<VersionParams>,
) -> AppResult<impl IntoResponse> {
    let article = state.articles.get(&id, params.parse()?).await?;
    Ok(Json(DataResponse { data: article }))
}

/// GET /articles/{id}/versions
pub async fn list_versions(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let versions = state.articles.list_versions(&id).await?;
    Ok(Json(DataResponse { data: versions }))
}

/// GET /articles/{id}/export?version=N
///
/// Plain-text download of one snapshot.
pub async fn export_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<VersionParams>,
) -> AppResult<impl IntoResponse> {
    let article = state.articles.get(&id, params.parse()?).await?;

    let body = render_plain_text(&ExportDocument {
        title: &article.title,
        workspace_id: &article.workspace_id,
        version: article.version,
        created_at: article.created_at,
        updated_at: Some(article.updated_at),
        author: article.created_by.map(|u| u.to_string()),
        content: &article.content,
    });
    let disposition = format!(
        "attachment; filename=\"{}\"",
        export_file_name(&article.title)
    );

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}

/* --------------------------------------------------------------------------
Writes
-------------------------------------------------------------------------- */

/// POST /articles
pub async fn create_article(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateArticle>,
) -> AppResult<impl IntoResponse> {
    let article = state.articles.create(&input, Some(auth.user_id)).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: article })))
}

/// PUT /articles/{id}
///
/// Every accepted update produces a new version.
pub async fn update_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateArticle>,
) -> AppResult<impl IntoResponse> {
    let envelope = ensure_envelope(&state.pool, &id).await?;
    auth.ensure_can_edit(envelope.created_by)?;

    let article = state.articles.update(&id, &input).await?;
    Ok(Json(DataResponse { data: article }))
}

/// DELETE /articles/{id}
pub async fn delete_article(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    let envelope = ensure_envelope(&state.pool, &id).await?;
    auth.ensure_can_edit(envelope.created_by)?;

    if !state.articles.delete(&id).await? {
        return Err(AppError::Core(CoreError::not_found("Article", &id)));
    }
    Ok(StatusCode::NO_CONTENT)
}
