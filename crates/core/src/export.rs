//! Plain-text rendering of an article snapshot for download.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::Timestamp;

static BLOCK_END_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|blockquote|pre|tr)>").expect("valid regex")
});
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("valid regex"));
static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));
static UNSAFE_FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// The fields printed in an export header.
#[derive(Debug, Clone)]
pub struct ExportDocument<'a> {
    pub title: &'a str,
    pub workspace_id: &'a str,
    pub version: i32,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub author: Option<String>,
    pub content: &'a str,
}

/// Convert rich-text HTML content into readable plain text.
pub fn html_to_text(html: &str) -> String {
    let with_breaks = BLOCK_END_RE.replace_all(html, "\n");
    let stripped = TAG_RE.replace_all(&with_breaks, "");
    let decoded = stripped
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    BLANK_LINES_RE
        .replace_all(&decoded, "\n\n")
        .trim()
        .to_string()
}

/// Render the export body: a short header followed by the content.
pub fn render_plain_text(doc: &ExportDocument<'_>) -> String {
    let title = if doc.title.trim().is_empty() {
        "Untitled"
    } else {
        doc.title
    };

    let mut out = String::new();
    out.push_str(title);
    out.push('\n');
    out.push_str(&"=".repeat(title.chars().count()));
    out.push_str("\n\n");
    out.push_str(&format!("Workspace: {}\n", doc.workspace_id));
    out.push_str(&format!("Version: {}\n", doc.version));
    out.push_str(&format!("Created: {}\n", doc.created_at.to_rfc3339()));
    if let Some(updated) = doc.updated_at {
        out.push_str(&format!("Updated: {}\n", updated.to_rfc3339()));
    }
    if let Some(author) = &doc.author {
        out.push_str(&format!("Author: {author}\n"));
    }
    out.push('\n');

    let body = html_to_text(doc.content);
    if body.is_empty() {
        out.push_str("(No content)");
    } else {
        out.push_str(&body);
    }
    out.push('\n');
    out
}

/// File name offered in `Content-Disposition` for an export.
pub fn export_file_name(title: &str) -> String {
    let safe = UNSAFE_FILENAME_RE.replace_all(title, "");
    let safe = safe.trim();
    if safe.is_empty() {
        "article.txt".to_string()
    } else {
        format!("{safe}.txt")
    }
}
