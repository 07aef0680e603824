//! Request extractors whose rejections render through [`AppError`].
//!
//! axum's stock `Json` rejects with plain-text bodies and 415/422 statuses;
//! [`AppJson`] maps those onto the `{error, code}` vocabulary instead.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use scribe_core::error::CoreError;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// JSON request body. Use in place of `axum::Json` for handler inputs.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            // Well-formed JSON of the wrong shape: missing or mistyped fields.
            JsonRejection::JsonDataError(e) => AppError::Core(CoreError::Validation(e.body_text())),
            JsonRejection::JsonSyntaxError(_) => {
                AppError::BadRequest("Request body is not valid JSON".into())
            }
            JsonRejection::MissingJsonContentType(_) => {
                AppError::BadRequest("Expected Content-Type: application/json".into())
            }
            other => AppError::BadRequest(other.body_text()),
        }
    }
}

/// Parse a sub-resource id taken from the path.
///
/// Anything that is not a UUID cannot name an existing record, so it is
/// reported as `NotFound` for `entity` rather than as a malformed URL.
pub fn parse_resource_id(entity: &'static str, raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::Core(CoreError::not_found(entity, raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_uuid_ids_are_not_found() {
        let err = parse_resource_id("Attachment", "1700000000000-42").unwrap_err();
        assert!(matches!(
            err,
            AppError::Core(CoreError::NotFound { entity: "Attachment", ref id }) if id == "1700000000000-42"
        ));
    }

    #[test]
    fn uuid_ids_parse() {
        let id = Uuid::new_v4();
        assert_eq!(parse_resource_id("Comment", &id.to_string()).unwrap(), id);
    }
}
