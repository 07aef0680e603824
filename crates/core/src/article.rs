//! Article input validation, slugging, and id derivation.
//!
//! Article ids are human-readable: a slug of the title followed by the UTC
//! creation minute, e.g. `release-notes-202410191342`. Two articles with the
//! same title in the same minute would clash, so callers retry with
//! [`id_with_suffix`] until the insert succeeds.

use crate::error::CoreError;
use crate::types::{Timestamp, VersionNumber};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Version number assigned to the snapshot written by `create`.
pub const FIRST_VERSION: VersionNumber = 1;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 120;

/// Maximum length of the slug portion of an article id.
pub const SLUG_MAX_CHARS: usize = 60;

/// Slug used when the title has no ASCII alphanumerics at all.
pub const FALLBACK_SLUG: &str = "article";

/// Upper bound on suffixed id attempts before giving up with a conflict.
pub const MAX_ID_ATTEMPTS: u32 = 100;

// ---------------------------------------------------------------------------
// Slugs and ids
// ---------------------------------------------------------------------------

/// Generate a URL-safe slug, truncated to `max_chars`.
///
/// Lowercases, maps every run of non-alphanumeric characters to a single
/// hyphen, and trims leading/trailing hyphens.
pub fn slugify(input: &str, max_chars: usize) -> String {
    let mut result = String::with_capacity(input.len());
    let mut prev_hyphen = true;
    for c in input.to_lowercase().chars() {
        if c.is_ascii_alphanumeric() {
            result.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            result.push('-');
            prev_hyphen = true;
        }
    }

    let truncated: String = result.chars().take(max_chars).collect();
    truncated.trim_matches('-').to_string()
}

/// Derive the base id for a new article: `<slug>-<YYYYMMDDHHMM>`.
pub fn derive_article_id(title: &str, created_at: Timestamp) -> String {
    let slug = slugify(title, SLUG_MAX_CHARS);
    let slug = if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    };
    format!("{slug}-{}", created_at.format("%Y%m%d%H%M"))
}

/// The id to try on the given attempt (0-based). Attempt 0 is the base id,
/// later attempts append `-2`, `-3`, ...
pub fn id_with_suffix(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{base}-{}", attempt + 1)
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validate an article title after trimming (3..=120 characters).
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let len = title.trim().chars().count();
    if len < TITLE_MIN_CHARS {
        return Err(CoreError::Validation("Title is too short".into()));
    }
    if len > TITLE_MAX_CHARS {
        return Err(CoreError::Validation("Title too long".into()));
    }
    Ok(())
}

/// Validate article content (non-empty after trimming).
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation("Content is required".into()));
    }
    Ok(())
}

/// Validate a requested version number (must be >= 1).
pub fn validate_version(version: VersionNumber) -> Result<(), CoreError> {
    if version < FIRST_VERSION {
        return Err(CoreError::Validation("Invalid version number".into()));
    }
    Ok(())
}

/// Validate the title/content pair shared by create and update.
pub fn validate_draft(title: &str, content: &str) -> Result<(), CoreError> {
    validate_title(title)?;
    validate_content(content)
}
