//! Question & answer page.

use docintel_core::QuestionResponse;

use super::heading;

pub fn render_answer(response: &QuestionResponse) -> String {
    let mut out = heading("Answer");
    out.push_str(response.answer.trim());
    out.push('\n');

    if response.confidence > 0.0 {
        out.push_str(&format!("\nConfidence: {:.0}%\n", response.confidence * 100.0));
    }

    if !response.sources.is_empty() {
        out.push('\n');
        out.push_str(&heading("Sources"));
        for (i, source) in response.sources.iter().enumerate() {
            out.push_str(&format!(
                "{}. chunk #{} (similarity {:.2})\n   {}\n",
                i + 1,
                source.chunk_index,
                source.similarity_score,
                source.content_preview.trim()
            ));
        }
    }

    out
}
