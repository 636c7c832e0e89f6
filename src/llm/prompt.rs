// Analysis prompt assembly.
//
// The prompt frames the assistant as a data analyst, embeds the extracted
// content (tabular content serialized as JSON, capped at the first 100 rows;
// free text verbatim), and appends the user's question. Built fresh per
// request, never persisted.

use crate::types::{AnalystError, AnalystResult, ExtractedContent};

/// Tabular content sent to the model is capped at this many rows.
pub const PROMPT_ROW_CAP: usize = 100;

pub fn build_prompt(content: &ExtractedContent, question: &str) -> AnalystResult<String> {
    let (noun, body) = match content {
        ExtractedContent::Text(text) => ("text", text.clone()),
        ExtractedContent::Rows(rows) => {
            let capped = &rows[..rows.len().min(PROMPT_ROW_CAP)];
            let json = serde_json::to_string(capped)
                .map_err(|e| AnalystError::Internal(e.to_string()))?;
            ("data", json)
        }
    };

    Ok(format!(
        "You are a professional data analyst. Based on the following {noun}, \
         answer the question:\n\n{body}\n\nQuestion: {question}"
    ))
}
