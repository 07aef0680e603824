//! Attachment acceptance policy and storage naming (upload boundary).
//!
//! The attachment ledger itself trusts its caller; these checks run in the
//! HTTP layer before any bytes are written.

use rand::Rng;

use crate::error::CoreError;

/// Default per-file size cap (5 MiB).
pub const DEFAULT_MAX_ATTACHMENT_BYTES: usize = 5 * 1024 * 1024;

/// Public URL prefix under which stored bytes are served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads";

const MAX_EXTENSION_CHARS: usize = 10;

/// Only images and PDFs may be attached.
pub fn is_allowed_mime(mime: &str) -> bool {
    mime.starts_with("image/") || mime == "application/pdf"
}

/// Validate an incoming upload's MIME type and size.
pub fn validate_upload(mime: &str, size: usize, max_bytes: usize) -> Result<(), CoreError> {
    if !is_allowed_mime(mime) {
        return Err(CoreError::Validation(
            "Only image and PDF files are allowed".into(),
        ));
    }
    if size == 0 {
        return Err(CoreError::Validation("File is required".into()));
    }
    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File is too large (max {}MB)",
            max_bytes / (1024 * 1024)
        )));
    }
    Ok(())
}

/// Lowercased, alphanumeric-only extension of the client-supplied file name.
pub fn file_extension(original_name: &str) -> Option<String> {
    let (stem, ext) = original_name.rsplit_once('.')?;
    if stem.is_empty() {
        return None;
    }
    let ext: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXTENSION_CHARS)
        .collect::<String>()
        .to_lowercase();
    (!ext.is_empty()).then_some(ext)
}

/// Storage-local file name: `<unix-millis>-<random>[.<ext>]`.
///
/// Never derived from the client name beyond its extension, so stored names
/// cannot traverse directories.
pub fn storage_file_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::rng().random_range(0..1_000_000_000);
    match file_extension(original_name) {
        Some(ext) => format!("{millis}-{nonce}.{ext}"),
        None => format!("{millis}-{nonce}"),
    }
}

/// Public URL of a stored attachment.
pub fn attachment_url(article_id: &str, file_name: &str) -> String {
    format!("{UPLOADS_URL_PREFIX}/{article_id}/{file_name}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allows_images_and_pdf_only() {
        assert!(is_allowed_mime("image/png"));
        assert!(is_allowed_mime("image/svg+xml"));
        assert!(is_allowed_mime("application/pdf"));
        assert!(!is_allowed_mime("application/zip"));
        assert!(!is_allowed_mime("text/html"));
    }

    #[test]
    fn rejects_oversized_and_empty_uploads() {
        let max = DEFAULT_MAX_ATTACHMENT_BYTES;
        assert!(validate_upload("image/png", max, max).is_ok());
        assert!(validate_upload("image/png", max + 1, max).is_err());
        assert!(validate_upload("image/png", 0, max).is_err());
        assert!(validate_upload("text/plain", 10, max).is_err());
    }

    #[test]
    fn extension_is_sanitized() {
        assert_eq!(file_extension("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(file_extension("a.b/../x").as_deref(), Some("x"));
        assert_eq!(file_extension("cat.p/n\\g").as_deref(), Some("png"));
        assert_eq!(file_extension(".hidden"), None);
        assert_eq!(file_extension("noext"), None);
    }

    #[test]
    fn storage_names_keep_extension_and_differ() {
        let a = storage_file_name("report.pdf");
        let b = storage_file_name("report.pdf");
        assert!(a.ends_with(".pdf"));
        assert!(!a.contains('/'));
        assert_ne!(a, b);

        let hostile = storage_file_name("../../etc/passwd.p/../ng");
        assert!(!hostile.contains('/'));
        assert!(!hostile.contains(".."));
        assert!(hostile.ends_with(".ng"));
    }

    #[test]
    fn url_is_rooted_under_uploads() {
        assert_eq!(
            attachment_url("hello-202401010000", "1-2.png"),
            "/uploads/hello-202401010000/1-2.png"
        );
    }
}
