// Office document (docx) extraction: paragraphs and runs flattened to raw
// text, all formatting discarded.

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

use crate::types::{AnalystError, AnalystResult, ExtractedContent};

pub fn extract(payload: &[u8]) -> AnalystResult<ExtractedContent> {
    let docx = read_docx(payload).map_err(|e| AnalystError::Extraction(e.to_string()))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for child in docx.document.children.iter() {
        if let DocumentChild::Paragraph(para) = child {
            let para_text: String = para
                .children
                .iter()
                .filter_map(|pc| match pc {
                    ParagraphChild::Run(run) => Some(
                        run.children
                            .iter()
                            .filter_map(|rc| match rc {
                                RunChild::Text(t) => Some(t.text.as_str()),
                                _ => None,
                            })
                            .collect::<Vec<_>>()
                            .join(""),
                    ),
                    _ => None,
                })
                .collect::<Vec<_>>()
                .join("");

            if !para_text.is_empty() {
                paragraphs.push(para_text);
            }
        }
    }

    Ok(ExtractedContent::Text(paragraphs.join("\n")))
}
