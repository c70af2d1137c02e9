//! Records exchanged with the document-intelligence backend.
//!
//! The backend is loose about shapes: ids arrive as numbers, page counts as
//! `pages`, single-document responses may or may not be wrapped in
//! `{success, document, ...}`. Decoding absorbs those differences here so
//! callers only see one shape per record.

use chrono::{DateTime, FixedOffset};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::status::{normalize_status, DisplayStatus};
use crate::upload::FileType;

/// Chunk-count hint sent with a question when the caller gives none.
pub const DEFAULT_NUM_CHUNKS: u32 = 3;

/// An uploaded document as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub file_type: String,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, alias = "pages")]
    pub pages_count: u32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub processing_status: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks_count: Option<u64>,
}

impl Document {
    /// Processing status folded into the display vocabulary.
    pub fn status(&self) -> DisplayStatus {
        normalize_status(self.processing_status.as_deref())
    }

    /// File type, tolerating the backend's leading-dot form (`".pdf"`).
    pub fn file_kind(&self) -> Option<FileType> {
        FileType::from_extension(&self.file_type)
    }

    /// `created_at` parsed as RFC 3339.
    pub fn created_on(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}

/// `GET /documents/` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentList {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentList {
    /// True when there is nothing to show: an unsuccessful listing or a zero count.
    pub fn is_empty(&self) -> bool {
        !self.success || self.count == 0
    }
}

/// Result of `POST /documents/upload/`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub document: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunks_created: Option<u64>,
}

impl<'de> Deserialize<'de> for UploadResponse {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self {
            success: value.get("success").and_then(Value::as_bool),
            chunks_created: value.get("chunks_created").and_then(Value::as_u64),
            document: unwrap_document(&value).map_err(D::Error::custom)?,
        })
    }
}

/// Chunk excerpt included with document details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChunkPreview {
    #[serde(alias = "chunk_index")]
    pub index: u32,
    #[serde(default)]
    pub content_preview: String,
    #[serde(default)]
    pub page_number: Option<u32>,
}

/// Result of `GET /documents/{id}/`.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentDetails {
    pub document: Document,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_chunks: Option<u64>,
    pub chunks_sample: Vec<ChunkPreview>,
}

impl<'de> Deserialize<'de> for DocumentDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        let chunks_sample = match value.get("chunks_sample") {
            Some(sample) if !sample.is_null() => {
                Vec::<ChunkPreview>::deserialize(sample).map_err(D::Error::custom)?
            }
            _ => Vec::new(),
        };
        Ok(Self {
            total_chunks: value.get("total_chunks").and_then(Value::as_u64),
            document: unwrap_document(&value).map_err(D::Error::custom)?,
            chunks_sample,
        })
    }
}

/// Body of `POST /ask/`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AskRequest {
    pub document_id: String,
    pub question: String,
    pub num_chunks: u32,
}

/// One retrieved passage backing an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSnippet {
    pub chunk_index: u32,
    #[serde(default)]
    pub content_preview: String,
    #[serde(default)]
    pub similarity_score: f64,
}

/// Minimal document reference echoed with an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentRef {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub title: String,
}

/// Answer to a question, with the passages it was drawn from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionResponse {
    pub answer: String,
    #[serde(default)]
    pub confidence: f64,
    #[serde(default)]
    pub sources: Vec<SourceSnippet>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_chunks: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_chunks_used: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentRef>,
}

/// Reject empty or whitespace-only questions before they are sent.
pub fn validate_question(question: &str) -> Result<&str> {
    if question.trim().is_empty() {
        return Err(Error::EmptyQuestion);
    }
    Ok(question)
}

/// Decode a 2xx response body into `T`. Only a shape mismatch is an error;
/// a body that reports `success: false` still decodes as-is.
pub fn decode_payload<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_json::from_value(value)
        .map_err(|e| Error::Parse(format!("Unexpected response shape: {}", e)))
}

/// Accept either `{..., "document": {...}}` or a bare document object.
fn unwrap_document(value: &Value) -> std::result::Result<Document, serde_json::Error> {
    let payload = match value.get("document") {
        Some(doc) if doc.is_object() => doc,
        _ => value,
    };
    Document::deserialize(payload)
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn backend_document() -> Value {
        json!({
            "id": 7,
            "title": "Quarterly report",
            "file_type": ".pdf",
            "file_size": 1536,
            "pages": 12,
            "processing_status": "processed",
            "created_at": "2025-03-04T10:15:00Z",
        })
    }

    #[test]
    fn test_document_from_backend_shape() {
        let doc: Document = serde_json::from_value(backend_document()).unwrap();
        assert_eq!(doc.id, "7");
        assert_eq!(doc.pages_count, 12);
        assert_eq!(doc.file_kind(), Some(FileType::Pdf));
        assert_eq!(doc.status(), DisplayStatus::Completed);
        assert_eq!(doc.chunks_count, None);
        assert_eq!(doc.updated_at, None);

        let created = doc.created_on().unwrap();
        assert_eq!(created.format("%Y-%m-%d").to_string(), "2025-03-04");
    }

    #[test]
    fn test_document_tolerates_odd_status() {
        let doc: Document = serde_json::from_value(json!({
            "id": "abc",
            "processing_status": 42,
        }))
        .unwrap();
        assert_eq!(doc.processing_status, None);
        assert_eq!(doc.status(), DisplayStatus::Processing);
        assert_eq!(doc.created_on(), None);

        let doc: Document = serde_json::from_value(json!({"id": "abc", "processing_status": null})).unwrap();
        assert_eq!(doc.processing_status, None);
    }

    #[test]
    fn test_document_requires_usable_id() {
        assert!(serde_json::from_value::<Document>(json!({"title": "x"})).is_err());
        assert!(serde_json::from_value::<Document>(json!({"id": [1]})).is_err());
    }

    #[test]
    fn test_document_list() {
        let list: DocumentList = decode_payload(json!({
            "success": true,
            "documents": [backend_document()],
            "count": 1,
        }))
        .unwrap();
        assert!(!list.is_empty());
        assert_eq!(list.documents[0].title, "Quarterly report");

        let empty: DocumentList = decode_payload(json!({"success": true, "documents": [], "count": 0})).unwrap();
        assert!(empty.is_empty());

        let failed: DocumentList = decode_payload(json!({"success": false, "count": 3})).unwrap();
        assert!(failed.is_empty());
    }

    #[test]
    fn test_upload_response_wrapped_and_bare() {
        let wrapped: UploadResponse = decode_payload(json!({
            "success": true,
            "document": backend_document(),
            "chunks_created": 14,
        }))
        .unwrap();
        assert_eq!(wrapped.success, Some(true));
        assert_eq!(wrapped.chunks_created, Some(14));
        assert_eq!(wrapped.document.id, "7");

        let bare: UploadResponse = decode_payload(backend_document()).unwrap();
        assert_eq!(bare.success, None);
        assert_eq!(bare.document.title, "Quarterly report");
    }

    #[test]
    fn test_document_details() {
        let details: DocumentDetails = decode_payload(json!({
            "success": true,
            "document": backend_document(),
            "total_chunks": 9,
            "chunks_sample": [
                {"index": 0, "content_preview": "Revenue grew...", "page_number": 1},
                {"index": 1, "content_preview": "Costs fell..."},
            ],
        }))
        .unwrap();
        assert_eq!(details.total_chunks, Some(9));
        assert_eq!(details.chunks_sample.len(), 2);
        assert_eq!(details.chunks_sample[1].page_number, None);

        let bare: DocumentDetails = decode_payload(backend_document()).unwrap();
        assert!(bare.chunks_sample.is_empty());
        assert_eq!(bare.document.pages_count, 12);
    }

    #[test]
    fn test_question_response() {
        let response: QuestionResponse = decode_payload(json!({
            "success": true,
            "question": "Why?",
            "answer": "Because revenue grew.",
            "sources": [
                {"chunk_index": 3, "content_preview": "Revenue grew 12%", "similarity_score": 0.82},
            ],
            "document": {"id": 7, "title": "Quarterly report"},
            "context_chunks_used": 1,
        }))
        .unwrap();
        assert_eq!(response.confidence, 0.0);
        assert_eq!(response.sources[0].chunk_index, 3);
        assert_eq!(response.document.as_ref().unwrap().id, "7");
        assert_eq!(response.relevant_chunks, None);
    }

    #[test]
    fn test_unsuccessful_listing_decodes_as_empty() {
        let list: DocumentList = decode_payload(json!({
            "success": false,
            "documents": [],
            "count": 0,
            "error": "db down",
        }))
        .unwrap();
        assert!(list.is_empty());
        assert_eq!(list.error.as_deref(), Some("db down"));
    }

    #[test]
    fn test_decode_rejects_unexpected_shape() {
        // No `answer`: the backend's own error text is not promoted to a failure message.
        let err = decode_payload::<QuestionResponse>(json!({
            "success": false,
            "error": "Document is not ready for querying.",
        }))
        .unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
        assert!(err.to_string().starts_with("Unexpected response shape"));

        let err = decode_payload::<QuestionResponse>(json!({"sources": []})).unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn test_ask_request_body() {
        let body = serde_json::to_value(AskRequest {
            document_id: "7".into(),
            question: "Why".into(),
            num_chunks: DEFAULT_NUM_CHUNKS,
        })
        .unwrap();
        assert_eq!(body, json!({"document_id": "7", "question": "Why", "num_chunks": 3}));
    }

    #[test]
    fn test_validate_question() {
        assert_eq!(validate_question(" Why? ").unwrap(), " Why? ");
        assert!(matches!(validate_question(""), Err(Error::EmptyQuestion)));
        assert!(matches!(validate_question(" \n\t"), Err(Error::EmptyQuestion)));
    }
}
