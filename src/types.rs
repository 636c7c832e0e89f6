// Shared type definitions: extracted content, previews, error taxonomy

use indexmap::IndexMap;
use serde_json::Value;

/// One spreadsheet row: column header -> cell value, in header order.
pub type Row = IndexMap<String, Value>;

/// Number of rows shown in a tabular preview.
pub const PREVIEW_ROWS: usize = 5;
/// Number of characters shown in a free-text preview.
pub const PREVIEW_CHARS: usize = 1000;

/// Content pulled out of an uploaded file. The variant is fixed by the file
/// extension at extraction time and never changes afterward.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ExtractedContent {
    Text(String),
    Rows(Vec<Row>),
}

impl ExtractedContent {
    pub fn is_tabular(&self) -> bool {
        matches!(self, ExtractedContent::Rows(_))
    }

    /// Truncated view of the content: first 5 rows or first 1000 characters.
    /// Derived on demand so it can never drift from the underlying value.
    pub fn preview(&self) -> ContentPreview {
        match self {
            ExtractedContent::Text(text) => {
                ContentPreview::Text(text.chars().take(PREVIEW_CHARS).collect())
            }
            ExtractedContent::Rows(rows) => {
                ContentPreview::Rows(rows.iter().take(PREVIEW_ROWS).cloned().collect())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum ContentPreview {
    Text(String),
    Rows(Vec<Row>),
}

#[derive(Debug, thiserror::Error)]
pub enum AnalystError {
    /// Extension not in the supported set. The message is part of the
    /// external contract, keep it verbatim.
    #[error("Unsupported file type")]
    UnsupportedFormat,

    /// Underlying parser/OCR failure, message passed through unchanged.
    #[error("{0}")]
    Extraction(String),

    /// Remote completion call failed or returned an unusable response.
    #[error("API Error: {0}")]
    Completion(String),

    /// Analysis attempted without a loaded file, credential, or question.
    #[error("Missing precondition: {0}")]
    MissingPrecondition(&'static str),

    /// Local failure that is neither the file's nor the endpoint's fault,
    /// e.g. prompt serialization.
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AnalystResult<T> = std::result::Result<T, AnalystError>;
