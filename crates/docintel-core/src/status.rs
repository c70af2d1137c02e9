//! Processing-status vocabulary shown to users.
//!
//! The backend is free to report synonyms (`processed`, `uploading`, `error`,
//! `pending`, ...) or nothing at all. Everything folds into one of three
//! display states.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Status label used when the backend reports none.
pub const UNKNOWN_STATUS: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayStatus {
    Processing,
    Completed,
    Failed,
}

impl DisplayStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayStatus::Processing => "processing",
            DisplayStatus::Completed => "completed",
            DisplayStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for DisplayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Map a raw backend status to the display vocabulary.
///
/// Matching is case-insensitive. Unrecognized values, including a missing
/// status, are shown as `Processing`.
pub fn normalize_status(raw: Option<&str>) -> DisplayStatus {
    let normalized = raw.unwrap_or(UNKNOWN_STATUS).to_lowercase();

    match normalized.as_str() {
        "processed" | "completed" => DisplayStatus::Completed,
        "processing" | "uploading" => DisplayStatus::Processing,
        "failed" | "error" => DisplayStatus::Failed,
        other => {
            debug!("Unrecognized processing status {:?}, showing as processing", other);
            DisplayStatus::Processing
        }
    }
}

/// Same as [`normalize_status`] for arbitrary JSON; non-strings count as missing.
pub fn normalize_status_value(raw: &serde_json::Value) -> DisplayStatus {
    normalize_status(raw.as_str())
}

/// Badge text for a raw status: first letter upper-cased, the rest lower-cased.
pub fn status_label(raw: Option<&str>) -> String {
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => UNKNOWN_STATUS,
    };

    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.as_str().to_lowercase().chars())
            .collect(),
        None => String::new(),
    }
}
