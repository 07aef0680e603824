//! Workspace id derivation and validation.

use crate::article::slugify;
use crate::error::CoreError;

/// Workspace created at startup so a fresh install always has a tenant.
pub const DEFAULT_WORKSPACE_ID: &str = "default";
pub const DEFAULT_WORKSPACE_NAME: &str = "Default Workspace";

pub const WORKSPACE_ID_MAX_CHARS: usize = 50;
pub const WORKSPACE_NAME_MIN_CHARS: usize = 2;
pub const WORKSPACE_NAME_MAX_CHARS: usize = 120;

/// Base id for a new workspace: the supplied id, else a slug of the name,
/// else `workspace`. Always at most 50 characters.
pub fn base_workspace_id(requested: Option<&str>, name: &str) -> String {
    let candidate = requested
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| slugify(name, WORKSPACE_ID_MAX_CHARS));
    let candidate = if candidate.is_empty() {
        "workspace".to_string()
    } else {
        candidate
    };
    candidate.chars().take(WORKSPACE_ID_MAX_CHARS).collect()
}

/// Candidate id for a given attempt: `base`, then `base-1`, `base-2`, ...
///
/// The base is shortened as needed so the result stays within 50 characters.
pub fn workspace_id_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        return base.to_string();
    }
    let suffix = format!("-{attempt}");
    let keep = WORKSPACE_ID_MAX_CHARS.saturating_sub(suffix.len());
    let stem: String = base.chars().take(keep).collect();
    format!("{stem}{suffix}")
}

/// Validate a workspace reference supplied by a client.
pub fn validate_workspace_id(id: &str) -> Result<(), CoreError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(CoreError::Validation("Workspace is required".into()));
    }
    if id.chars().count() > WORKSPACE_ID_MAX_CHARS {
        return Err(CoreError::Validation("Workspace id too long".into()));
    }
    Ok(())
}

/// Validate a workspace display name (2..=120 characters after trimming).
pub fn validate_workspace_name(name: &str) -> Result<(), CoreError> {
    let len = name.trim().chars().count();
    if len < WORKSPACE_NAME_MIN_CHARS {
        return Err(CoreError::Validation("Name is too short".into()));
    }
    if len > WORKSPACE_NAME_MAX_CHARS {
        return Err(CoreError::Validation("Name too long".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_id_prefers_requested_id() {
        assert_eq!(base_workspace_id(Some(" team-a "), "Ignored"), "team-a");
        assert_eq!(base_workspace_id(Some("   "), "Team B"), "team-b");
        assert_eq!(base_workspace_id(None, "!!"), "workspace");
    }

    #[test]
    fn base_id_is_capped() {
        let long = "x".repeat(80);
        assert_eq!(base_workspace_id(Some(&long), "n").len(), 50);
    }

    #[test]
    fn candidates_suffix_from_one() {
        assert_eq!(workspace_id_candidate("docs", 0), "docs");
        assert_eq!(workspace_id_candidate("docs", 1), "docs-1");
    }

    #[test]
    fn suffixed_candidates_stay_within_limit() {
        let base = "y".repeat(50);
        let candidate = workspace_id_candidate(&base, 12);
        assert_eq!(candidate.len(), 50);
        assert!(candidate.ends_with("-12"));
    }

    #[test]
    fn name_bounds() {
        assert!(validate_workspace_name("a").is_err());
        assert!(validate_workspace_name("ab").is_ok());
        assert!(validate_workspace_name(&"n".repeat(121)).is_err());
    }

    #[test]
    fn workspace_reference_must_not_be_blank() {
        assert!(validate_workspace_id(" ").is_err());
        assert!(validate_workspace_id(DEFAULT_WORKSPACE_ID).is_ok());
    }
}
