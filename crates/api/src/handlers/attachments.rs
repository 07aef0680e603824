//! Handlers for article attachments.
//!
//! The MIME and size policy is enforced here, before any bytes reach the
//! byte store.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use scribe_core::attachment::validate_upload;

use crate::error::{AppError, AppResult};
use crate::extract::parse_resource_id;
use crate::handlers::articles::ensure_envelope;
use crate::middleware::auth::AuthUser;
use crate::orchestrator::NewAttachment;
use crate::response::DataResponse;
use crate::state::AppState;

/// Multipart field carrying the file.
const FILE_FIELD: &str = "file";

/// POST /articles/{id}/attachments (multipart, field `file`)
pub async fn upload_attachment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let envelope = ensure_envelope(&state.pool, &id).await?;
    auth.ensure_can_edit(envelope.created_by)?;

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.body_text()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let original_name = field
            .file_name()
            .map(str::to_string)
            .unwrap_or_else(|| "upload".to_string());
        let mime_type = field
            .content_type()
            .map(str::to_string)
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        upload = Some(NewAttachment {
            original_name,
            mime_type,
            bytes: bytes.to_vec(),
        });
        break;
    }

    let upload = upload.ok_or_else(|| AppError::BadRequest("File is required".into()))?;
    validate_upload(
        &upload.mime_type,
        upload.bytes.len(),
        state.config.max_upload_bytes,
    )?;

    let attachment = state.articles.attach(&id, upload).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: attachment })))
}

/// DELETE /articles/{id}/attachments/{attachment_id}
pub async fn delete_attachment(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, raw_attachment_id)): Path<(String, String)>,
) -> AppResult<StatusCode> {
    let envelope = ensure_envelope(&state.pool, &id).await?;
    auth.ensure_can_edit(envelope.created_by)?;
    let attachment_id = parse_resource_id("Attachment", &raw_attachment_id)?;

    state.articles.detach(&id, attachment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
