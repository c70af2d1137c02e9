//! DocIntel Core — document model, status vocabulary, formatting, upload selection.

pub mod config;
pub mod error;
pub mod format;
pub mod status;
pub mod types;
pub mod upload;

pub use config::{ClientConfig, DataPaths};
pub use error::{Error, ErrorKind, Result};
pub use format::{format_bytes, format_bytes_with};
pub use status::{normalize_status, normalize_status_value, status_label, DisplayStatus};
pub use types::*;
pub use upload::{FileType, UploadFile, MAX_UPLOAD_BYTES};
