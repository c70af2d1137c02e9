//! Upload page.

use docintel_core::{format_bytes, UploadFile, UploadResponse, MAX_UPLOAD_BYTES};

use super::{file_summary, status_badge, UPLOAD_SUCCEEDED};

/// The selected file, as shown before sending.
pub fn render_selection(file: &UploadFile) -> String {
    let mut out = format!(
        "{} ({}, {})\n",
        file.file_name(),
        file.file_type().label(),
        format_bytes(file.size())
    );
    if file.exceeds_advisory_limit() {
        out.push_str(&format!(
            "Note: files over {} may be rejected by the server.\n",
            format_bytes(MAX_UPLOAD_BYTES)
        ));
    }
    out
}

pub fn render_uploaded(response: &UploadResponse) -> String {
    let doc = &response.document;
    let mut out = format!(
        "{}\n{} (id {})  [{}]\n  {}\n",
        UPLOAD_SUCCEEDED,
        doc.title,
        doc.id,
        status_badge(doc),
        file_summary(doc)
    );
    if let Some(chunks) = response.chunks_created {
        out.push_str(&format!("  {} chunks created\n", chunks));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::fixtures::document;

    #[test]
    fn test_selection() {
        let file = UploadFile::new("notes.docx", vec![0; 2048]).unwrap();
        assert_eq!(render_selection(&file), "notes.docx (Word, 2 KB)\n");

        let big = UploadFile::new("scan.pdf", vec![0; (MAX_UPLOAD_BYTES + 1) as usize]).unwrap();
        assert!(render_selection(&big).contains("files over 10 MB"));
    }

    #[test]
    fn test_uploaded() {
        let response = UploadResponse {
            success: Some(true),
            document: document("9", Some("completed")),
            chunks_created: Some(14),
        };
        let out = render_uploaded(&response);
        assert!(out.starts_with(UPLOAD_SUCCEEDED));
        assert!(out.contains("Report 9 (id 9)  [Completed (completed)]"));
        assert!(out.contains("14 chunks created"));
    }
}
