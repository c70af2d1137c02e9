//! Error types for DocIntel.

use thiserror::Error;

/// Coarse classification of an [`Error`].
///
/// `Transport`, `Http` and `Parse` cover everything that can go wrong while
/// talking to the backend; the rest are local failures raised before any
/// request is made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No response reached us (connection refused, DNS, timeout).
    Transport,
    /// The backend answered with a non-2xx status.
    Http,
    /// A 2xx response whose body could not be decoded.
    Parse,
    /// Input rejected before any request was issued.
    Validation,
    Config,
    Io,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{message}")]
    Transport { message: String },

    #[error("{message}")]
    Http { status: u16, message: String },

    #[error("{0}")]
    Parse(String),

    #[error("Unsupported file type: {0}")]
    UnsupportedFileType(String),

    #[error("Question must not be empty")]
    EmptyQuestion,

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport { .. } => ErrorKind::Transport,
            Error::Http { .. } => ErrorKind::Http,
            Error::Parse(_) => ErrorKind::Parse,
            Error::UnsupportedFileType(_) | Error::EmptyQuestion => ErrorKind::Validation,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
        }
    }

    /// HTTP status code, for `Http` errors only.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
