// Format detection and extractor dispatch.
//
// The file extension is the sole format signal: lowercase substring after the
// final '.', no content sniffing. Each supported format maps to exactly one
// extractor; adding a format means adding a `FileFormat` variant and one match
// arm below.

pub mod docx;
pub mod image;
pub mod pdf;
pub mod sheet;
pub mod text;

use tracing::debug;

use crate::types::{AnalystError, AnalystResult, ExtractedContent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Text,
    Docx,
    Pdf,
    Csv,
    Xlsx,
    Png,
    Jpg,
    Jpeg,
}

impl FileFormat {
    /// Determine the format from the filename's extension, case-insensitively.
    /// Returns `None` for a missing or unrecognized extension.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let ext = filename.rsplit_once('.')?.1.to_lowercase();
        match ext.as_str() {
            "txt" => Some(FileFormat::Text),
            "docx" => Some(FileFormat::Docx),
            "pdf" => Some(FileFormat::Pdf),
            "csv" => Some(FileFormat::Csv),
            "xlsx" => Some(FileFormat::Xlsx),
            "png" => Some(FileFormat::Png),
            "jpg" => Some(FileFormat::Jpg),
            "jpeg" => Some(FileFormat::Jpeg),
            _ => None,
        }
    }
}

/// Route a file to the extractor matching its extension and return the
/// normalized content. Extractor failures propagate unchanged.
pub fn extract(filename: &str, payload: &[u8]) -> AnalystResult<ExtractedContent> {
    let format =
        FileFormat::from_filename(filename).ok_or(AnalystError::UnsupportedFormat)?;
    debug!(?format, filename, bytes = payload.len(), "extracting file");

    match format {
        FileFormat::Text => text::extract(payload),
        FileFormat::Docx => docx::extract(payload),
        FileFormat::Pdf => pdf::extract(payload),
        FileFormat::Csv => sheet::extract_csv(payload),
        FileFormat::Xlsx => sheet::extract_xlsx(payload),
        FileFormat::Png | FileFormat::Jpg | FileFormat::Jpeg => image::extract(payload),
    }
}
