//! Handlers for workspaces (tenants).

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scribe_core::error::CoreError;
use scribe_core::workspace::{base_workspace_id, validate_workspace_id, validate_workspace_name};
use scribe_db::models::workspace::{CreateWorkspace, UpdateWorkspace};
use scribe_db::repositories::WorkspaceRepo;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /workspaces
pub async fn list_workspaces(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workspaces = WorkspaceRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: workspaces }))
}

/// GET /workspaces/{id}
pub async fn get_workspace(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<impl IntoResponse> {
    let workspace = WorkspaceRepo::find_by_id(&state.pool, &id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Workspace", &id)))?;
    Ok(Json(DataResponse { data: workspace }))
}

/// POST /workspaces
///
/// The id is the supplied one or a slug of the name; a taken id gets a
/// numeric suffix.
pub async fn create_workspace(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateWorkspace>,
) -> AppResult<impl IntoResponse> {
    validate_workspace_name(&input.name)?;
    if let Some(id) = input.id.as_deref().filter(|s| !s.trim().is_empty()) {
        validate_workspace_id(id)?;
    }

    let base_id = base_workspace_id(input.id.as_deref(), &input.name);
    let workspace = WorkspaceRepo::create_unique(&state.pool, &base_id, input.name.trim())
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Conflict(format!(
                "No free workspace id near '{base_id}'"
            )))
        })?;

    tracing::info!(workspace_id = %workspace.id, "Workspace created");
    Ok((StatusCode::CREATED, Json(DataResponse { data: workspace })))
}

/// PUT /workspaces/{id}
pub async fn update_workspace(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateWorkspace>,
) -> AppResult<impl IntoResponse> {
    validate_workspace_name(&input.name)?;

    let workspace = WorkspaceRepo::rename(&state.pool, &id, input.name.trim())
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("Workspace", &id)))?;

    tracing::info!(workspace_id = %workspace.id, "Workspace renamed");
    Ok(Json(DataResponse { data: workspace }))
}
