//! Comment input rules.

use crate::error::CoreError;

pub const AUTHOR_MAX_CHARS: usize = 80;

/// Validate a comment body (non-empty after trimming).
pub fn validate_body(body: &str) -> Result<(), CoreError> {
    if body.trim().is_empty() {
        return Err(CoreError::Validation("Comment body is required".into()));
    }
    Ok(())
}

/// Trim the author name; blank names are stored as `NULL`.
pub fn normalize_author(author: Option<&str>) -> Result<Option<String>, CoreError> {
    let Some(author) = author.map(str::trim).filter(|a| !a.is_empty()) else {
        return Ok(None);
    };
    if author.chars().count() > AUTHOR_MAX_CHARS {
        return Err(CoreError::Validation("Author name too long".into()));
    }
    Ok(Some(author.to_string()))
}
