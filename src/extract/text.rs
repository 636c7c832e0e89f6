// Plain text extraction

use crate::types::{AnalystResult, ExtractedContent};

/// Return the file's textual content verbatim. Invalid UTF-8 sequences are
/// replaced rather than treated as a failure.
pub fn extract(payload: &[u8]) -> AnalystResult<ExtractedContent> {
    Ok(ExtractedContent::Text(
        String::from_utf8_lossy(payload).into_owned(),
    ))
}
