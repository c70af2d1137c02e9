//! Terminal renderers, one module per page.
//!
//! Renderers are pure: they take decoded backend records and return the text
//! to print. Commands decide where it goes.

pub mod dashboard;
pub mod detail;
pub mod qa;
pub mod upload;

use docintel_core::{format_bytes, status_label, Document};

pub const LOAD_FAILED: &str = "Failed to load documents. Please try refreshing the page.";
pub const UPLOAD_FAILED: &str = "Failed to upload document. Please try again.";
pub const UPLOAD_SUCCEEDED: &str = "Document uploaded successfully!";
pub const ANSWER_FAILED: &str = "Failed to get answer. Please try again.";
pub const DETAILS_FAILED: &str = "Failed to load document details.";
pub const EMPTY_QUESTION: &str = "Please enter a question.";
pub const UNSUPPORTED_FILE: &str = "Unsupported file type. Choose a PDF, DOCX, or TXT file.";

/// Title with an underline of matching width.
pub(crate) fn heading(title: &str) -> String {
    format!("{}\n{}\n", title, "=".repeat(title.chars().count()))
}

/// `Processed (completed)`: the backend's word, then what it means.
pub(crate) fn status_badge(doc: &Document) -> String {
    format!(
        "{} ({})",
        status_label(doc.processing_status.as_deref()),
        doc.status()
    )
}

/// `PDF • 1.5 KB • 12 pages`; the page count is left out when unknown.
pub(crate) fn file_summary(doc: &Document) -> String {
    let kind = doc
        .file_kind()
        .map(|k| k.label().to_string())
        .unwrap_or_else(|| doc.file_type.trim_start_matches('.').to_uppercase());

    let mut parts = Vec::new();
    if !kind.is_empty() {
        parts.push(kind);
    }
    parts.push(format_bytes(doc.file_size));
    if doc.pages_count > 0 {
        parts.push(format!("{} pages", doc.pages_count));
    }
    parts.join(" • ")
}

/// `Mar 4, 2025`, or the raw value when it is not RFC 3339.
pub(crate) fn created_date(doc: &Document) -> String {
    match doc.created_on() {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None if doc.created_at.is_empty() => "unknown date".to_string(),
        None => doc.created_at.clone(),
    }
}
