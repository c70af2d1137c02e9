//! The API client: one method per backend endpoint.

use std::sync::Arc;
use std::time::Duration;

use docintel_core::{
    decode_payload, AskRequest, ClientConfig, DocumentDetails, DocumentList, Error,
    QuestionResponse, Result, UploadFile, UploadResponse, DEFAULT_NUM_CHUNKS,
};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::{NoToken, TokenProvider};

/// Message used when nothing more specific is available.
pub const FALLBACK_ERROR_MESSAGE: &str = "API request failed";

/// Client for the document-intelligence REST API.
///
/// Every call is a single attempt bounded by the configured timeout. Any
/// failure comes back as one [`Error`] whose `Display` is the best message
/// available: the body's `message`, then the transport's own description.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: Url,
    timeout: Duration,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, tokens: Arc<dyn TokenProvider>) -> Result<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url,
            timeout: config.timeout,
            tokens,
        })
    }

    /// A client that never sends an `Authorization` header.
    pub fn unauthenticated(config: &ClientConfig) -> Result<Self> {
        Self::new(config, Arc::new(NoToken))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// POST /documents/upload/, multipart body with a single `file` field.
    pub async fn upload_document(&self, file: &UploadFile) -> Result<UploadResponse> {
        let part = Part::bytes(file.bytes().to_vec())
            .file_name(file.file_name().to_string())
            .mime_str(file.mime_type())
            .map_err(|e| Error::Config(format!("Invalid MIME type: {}", e)))?;
        let form = Form::new().part("file", part);

        info!("Uploading {} ({} bytes)", file.file_name(), file.size());
        let request = self
            .http
            .post(endpoint(&self.base_url, &["documents", "upload"]))
            .multipart(form);
        self.send(request).await
    }

    /// GET /documents/
    pub async fn fetch_documents(&self) -> Result<DocumentList> {
        let request = self.http.get(endpoint(&self.base_url, &["documents"]));
        self.send(request).await
    }

    /// POST /ask/ with the default chunk-count hint.
    pub async fn ask_question(&self, document_id: &str, question: &str) -> Result<QuestionResponse> {
        self.ask_question_with(document_id, question, DEFAULT_NUM_CHUNKS)
            .await
    }

    /// POST /ask/. The question is sent exactly as given.
    pub async fn ask_question_with(
        &self,
        document_id: &str,
        question: &str,
        num_chunks: u32,
    ) -> Result<QuestionResponse> {
        let body = AskRequest {
            document_id: document_id.to_string(),
            question: question.to_string(),
            num_chunks,
        };
        let request = self.http.post(endpoint(&self.base_url, &["ask"])).json(&body);
        self.send(request).await
    }

    /// GET /documents/{id}/
    pub async fn get_document_details(&self, document_id: &str) -> Result<DocumentDetails> {
        let request = self
            .http
            .get(endpoint(&self.base_url, &["documents", document_id]));
        self.send(request).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let request = match self.tokens.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let request = request.build().map_err(|e| self.transport_error(e))?;
        let (method, url) = (request.method().clone(), request.url().clone());
        debug!("{} {}", method, url);

        let response = self.http.execute(request).await.map_err(|e| {
            let err = self.transport_error(e);
            warn!("{} {} failed: {}", method, url, err);
            err
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            warn!("{} {} returned {}: {}", method, url, status, message);
            return Err(Error::Http {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response.bytes().await.map_err(|e| self.transport_error(e))?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
            warn!("{} {} returned malformed JSON: {}", method, url, e);
            Error::Parse(format!("Malformed response: {}", e))
        })?;
        decode_payload(value)
    }

    fn transport_error(&self, e: reqwest::Error) -> Error {
        let message = if e.is_timeout() {
            format!("Request timed out after {} ms", self.timeout.as_millis())
        } else {
            error_chain(&e)
        };
        Error::Transport {
            message: if message.trim().is_empty() {
                FALLBACK_ERROR_MESSAGE.to_string()
            } else {
                message
            },
        }
    }
}

/// Pick the most useful message for a non-2xx response.
pub(crate) fn error_message(status: u16, body: &str) -> String {
    let parsed: Option<Value> = serde_json::from_str(body).ok();
    let from_body = |key: &str| {
        parsed
            .as_ref()
            .and_then(|v| v.get(key))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    };

    from_body("message").unwrap_or_else(|| format!("Request failed with status code {}", status))
}

/// Render an error with its sources, e.g. `error sending request: connection refused`.
pub(crate) fn error_chain(e: &dyn std::error::Error) -> String {
    let mut message = e.to_string();
    let mut source = e.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !text.is_empty() && !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}

pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| Error::Config(format!("Invalid API base URL {}: {}", raw, e)))?;
    if url.cannot_be_a_base() {
        return Err(Error::Config(format!("API base URL cannot have paths: {}", raw)));
    }
    Ok(url)
}

/// Append path segments (each percent-encoded) plus the trailing slash the backend expects.
pub(crate) fn endpoint(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments).push("");
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_priority() {
        assert_eq!(
            error_message(404, r#"{"message": "Document not found", "error": "other"}"#),
            "Document not found"
        );
        // `error` is not a message source.
        assert_eq!(
            error_message(400, r#"{"success": false, "error": "Document is not ready"}"#),
            "Request failed with status code 400"
        );
        assert_eq!(error_message(422, r#"{"message": "  "}"#), "  ");
        assert_eq!(
            error_message(500, r#"{"message": ""}"#),
            "Request failed with status code 500"
        );
        assert_eq!(
            error_message(502, "<html>Bad Gateway</html>"),
            "Request failed with status code 502"
        );
        assert_eq!(error_message(404, ""), "Request failed with status code 404");
    }

    #[test]
    fn test_endpoint_paths() {
        let base = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(
            endpoint(&base, &["documents", "upload"]).as_str(),
            "http://localhost:8000/api/documents/upload/"
        );

        let slashed = parse_base_url("http://localhost:8000/api/").unwrap();
        assert_eq!(endpoint(&slashed, &["ask"]).as_str(), "http://localhost:8000/api/ask/");

        let root = parse_base_url("https://docs.example.com").unwrap();
        assert_eq!(endpoint(&root, &["documents"]).as_str(), "https://docs.example.com/documents/");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let base = parse_base_url("http://localhost:8000/api").unwrap();
        assert_eq!(
            endpoint(&base, &["documents", "a/b c"]).as_str(),
            "http://localhost:8000/api/documents/a%2Fb%20c/"
        );
    }

    #[test]
    fn test_rejects_unusable_base() {
        assert!(matches!(parse_base_url("not a url"), Err(Error::Config(_))));
        assert!(matches!(parse_base_url("mailto:docs@example.com"), Err(Error::Config(_))));
    }

    #[test]
    fn test_error_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused");
        assert_eq!(error_chain(&inner), "connection refused");
    }
}
