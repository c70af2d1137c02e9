//! Client configuration and local data paths.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_DATA_DIR: &str = "data";

/// Paths to local client state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataPaths {
    /// Root data directory (e.g., `data/`).
    pub root: PathBuf,
    /// Persistent key/value store holding the auth token (`data/local-storage.json`).
    pub token_store: PathBuf,
}

impl DataPaths {
    /// Derive data paths from a root directory. Nothing is created until
    /// something is written.
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref().to_path_buf();
        Self {
            token_store: root.join("local-storage.json"),
            root,
        }
    }
}

/// Everything needed to reach the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// REST base URL, including any `/api` prefix.
    pub base_url: String,
    /// Client-wide request timeout.
    pub timeout: Duration,
    pub data_paths: DataPaths,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            data_paths: DataPaths::new(DEFAULT_DATA_DIR),
        }
    }
}

impl ClientConfig {
    /// Create configuration from environment and defaults.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary variable lookup.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let base_url = lookup("DOCINTEL_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into());

        let timeout_ms = match lookup("DOCINTEL_TIMEOUT_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                Error::Config(format!("DOCINTEL_TIMEOUT_MS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_MS,
        };

        let data_dir = lookup("DOCINTEL_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.into());

        Self {
            base_url,
            timeout: Duration::from_millis(timeout_ms),
            data_paths: DataPaths::new(data_dir),
        }
        .validated()
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Result<Self> {
        self.base_url = base_url.into();
        self.validated()
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn validated(mut self) -> Result<Self> {
        let trimmed = self.base_url.trim();
        if trimmed.is_empty() {
            return Err(Error::Config("API base URL is not set".into()));
        }
        if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
            return Err(Error::Config(format!(
                "API base URL must be http(s): {}",
                trimmed
            )));
        }
        self.base_url = trimmed.to_string();
        Ok(self)
    }
}
