//! Dashboard: every uploaded document as a card.

use docintel_core::{Document, DocumentList};

use super::{created_date, file_summary, heading, status_badge};

pub const NO_DOCUMENTS: &str = "No documents uploaded yet.";

pub fn render_dashboard(list: &DocumentList) -> String {
    let mut out = heading("Documents");
    out.push('\n');

    if list.is_empty() {
        out.push_str(NO_DOCUMENTS);
        out.push('\n');
        return out;
    }

    let cards: Vec<String> = list.documents.iter().map(render_card).collect();
    out.push_str(&cards.join("\n"));
    out
}

fn render_card(doc: &Document) -> String {
    format!(
        "{}  [{}]\n  id {}\n  {}\n  {} • {} chunks\n",
        doc.title,
        status_badge(doc),
        doc.id,
        file_summary(doc),
        created_date(doc),
        doc.chunks_count.unwrap_or(0),
    )
}
