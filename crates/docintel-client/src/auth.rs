//! Bearer-token sources.
//!
//! The client never reaches for ambient state: whoever builds an
//! [`ApiClient`](crate::ApiClient) hands it a [`TokenProvider`], which is
//! consulted once per request.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use docintel_core::Result;
use tracing::{info, warn};

/// Key under which the auth token is persisted.
pub const AUTH_TOKEN_KEY: &str = "authToken";

/// Supplies the bearer token for outgoing requests, if any.
pub trait TokenProvider: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Never authenticates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoToken;

impl TokenProvider for NoToken {
    fn token(&self) -> Option<String> {
        None
    }
}

/// A fixed token.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl TokenProvider for StaticToken {
    fn token(&self) -> Option<String> {
        non_empty(Some(self.0.clone()))
    }
}

impl<F> TokenProvider for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn token(&self) -> Option<String> {
        non_empty(self())
    }
}

/// Persistent key/value store on disk (`local-storage.json`).
///
/// The file is re-read on every lookup, so a token written by another
/// process is picked up by the next request.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read a value. Missing or unreadable stores yield `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.load().remove(key)
    }

    /// Write a value, creating the store if needed.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.load();
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries)
    }

    /// Remove a value. Returns whether it was present.
    pub fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.load();
        let existed = entries.remove(key).is_some();
        if existed {
            self.save(&entries)?;
        }
        Ok(existed)
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        self.set(AUTH_TOKEN_KEY, token)?;
        info!("Saved auth token to {}", self.path.display());
        Ok(())
    }

    pub fn clear_token(&self) -> Result<bool> {
        self.remove(AUTH_TOKEN_KEY)
    }

    fn load(&self) -> BTreeMap<String, String> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(_) => return BTreeMap::new(),
        };
        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                warn!("Ignoring unreadable token store {}: {}", self.path.display(), e);
                BTreeMap::new()
            }
        }
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl TokenProvider for TokenStore {
    fn token(&self) -> Option<String> {
        non_empty(self.get(AUTH_TOKEN_KEY))
    }
}

fn non_empty(token: Option<String>) -> Option<String> {
    token.filter(|t| !t.is_empty())
}
