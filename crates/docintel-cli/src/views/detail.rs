//! Single-document page.

use docintel_core::DocumentDetails;

use super::{created_date, file_summary, heading, status_badge};

pub fn render_details(details: &DocumentDetails) -> String {
    let doc = &details.document;
    let mut out = heading(&doc.title);
    out.push_str(&format!("id:       {}\n", doc.id));
    out.push_str(&format!("status:   {}\n", status_badge(doc)));
    out.push_str(&format!("file:     {}\n", file_summary(doc)));
    out.push_str(&format!("uploaded: {}\n", created_date(doc)));

    let chunks = details.total_chunks.or(doc.chunks_count);
    if let Some(chunks) = chunks {
        out.push_str(&format!("chunks:   {}\n", chunks));
    }

    if !details.chunks_sample.is_empty() {
        out.push('\n');
        out.push_str(&heading("Sample chunks"));
        for chunk in &details.chunks_sample {
            let page = chunk
                .page_number
                .map(|p| format!(", page {}", p))
                .unwrap_or_default();
            out.push_str(&format!(
                "#{}{}\n   {}\n",
                chunk.index,
                page,
                chunk.content_preview.trim()
            ));
        }
    }

    out
}
