//! Upload selection: which files may be sent, and with what MIME type.

use std::path::Path;

use tracing::warn;

use crate::error::{Error, Result};
use crate::format::format_bytes;

/// Advisory upload cap (10 MiB). Shown as a hint, never enforced.
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

/// Document formats the backend accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileType {
    Pdf,
    Docx,
    Txt,
}

impl FileType {
    pub const ALL: [FileType; 3] = [FileType::Pdf, FileType::Docx, FileType::Txt];

    /// Detect file type from an extension. Case-insensitive; a leading dot is ignored.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Txt => "text/plain",
        }
    }

    /// Short label for listings.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word",
            Self::Txt => "Text",
        }
    }
}

/// A single file accepted for upload.
#[derive(Debug, Clone)]
pub struct UploadFile {
    file_name: String,
    file_type: FileType,
    bytes: Vec<u8>,
}

impl UploadFile {
    /// Select a file from disk. The extension is checked before the file is read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        let file_type = FileType::from_path(path)
            .ok_or_else(|| Error::UnsupportedFileType(file_name.clone()))?;

        let bytes = std::fs::read(path)?;
        Ok(Self::checked(file_name, file_type, bytes))
    }

    /// Select in-memory content under the given file name.
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self> {
        let file_name = file_name.into();
        let file_type = FileType::from_path(Path::new(&file_name))
            .ok_or_else(|| Error::UnsupportedFileType(file_name.clone()))?;
        Ok(Self::checked(file_name, file_type, bytes))
    }

    fn checked(file_name: String, file_type: FileType, bytes: Vec<u8>) -> Self {
        let file = Self {
            file_name,
            file_type,
            bytes,
        };
        if file.exceeds_advisory_limit() {
            warn!(
                "{} is {}, above the advised {} upload size",
                file.file_name,
                format_bytes(file.size()),
                format_bytes(MAX_UPLOAD_BYTES)
            );
        }
        file
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn file_type(&self) -> FileType {
        self.file_type
    }

    pub fn mime_type(&self) -> &'static str {
        self.file_type.mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn exceeds_advisory_limit(&self) -> bool {
        self.size() > MAX_UPLOAD_BYTES
    }
}
