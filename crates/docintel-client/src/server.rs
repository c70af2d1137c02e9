//! Uncached document listing for contexts that run before any user session
//! exists (initial page data, scripts, health checks).
//!
//! Unlike [`ApiClient`](crate::ApiClient) this sends no token, bypasses
//! caches, and does not dig through the response body for a message: a
//! non-2xx status is reported by code, and transport failures keep their raw
//! text.

use docintel_core::{decode_payload, ClientConfig, DocumentList, Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CACHE_CONTROL, CONTENT_TYPE, PRAGMA};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::{debug, error};

use crate::client::{endpoint, parse_base_url};

#[derive(Debug, Clone)]
pub struct ServerFetcher {
    http: Client,
    base_url: Url,
}

impl ServerFetcher {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// GET /documents/, always re-fetched. Failures are logged, then returned.
    pub async fn fetch_documents(&self) -> Result<DocumentList> {
        self.try_fetch_documents().await.map_err(|e| {
            error!("Error fetching documents: {}", e);
            e
        })
    }

    async fn try_fetch_documents(&self) -> Result<DocumentList> {
        let url = endpoint(&self.base_url, &["documents"]);
        debug!("GET {} (uncached)", url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: format!("HTTP error! status: {}", status.as_u16()),
            });
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| Error::Parse(format!("Malformed response: {}", e)))?;
        decode_payload(value)
    }
}
