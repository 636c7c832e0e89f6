// Image (png/jpg/jpeg) extraction via Tesseract OCR.
//
// The recognition engine is acquired for exactly one recognition call and
// released when the handle goes out of scope, including on failure paths. The
// decoded pixel buffer is the transient handle for the image payload and is
// dropped after use.
//
// Compiled in with the `ocr` cargo feature; without it the extractor reports
// a recognition failure instead of silently degrading.

use crate::types::{AnalystError, AnalystResult, ExtractedContent};

#[cfg(feature = "ocr")]
pub fn extract(payload: &[u8]) -> AnalystResult<ExtractedContent> {
    use image::GenericImageView;

    let decoded = image::load_from_memory(payload)
        .map_err(|e| AnalystError::Extraction(e.to_string()))?;
    let (width, height) = decoded.dimensions();
    let pixels = decoded.to_rgb8();

    let engine = OcrEngine::acquire()?;
    let text = engine.recognize(pixels.as_raw(), width as i32, height as i32)?;

    Ok(ExtractedContent::Text(text))
}

#[cfg(not(feature = "ocr"))]
pub fn extract(_payload: &[u8]) -> AnalystResult<ExtractedContent> {
    Err(AnalystError::Extraction(
        "image recognition is not available: rebuild with --features ocr".to_string(),
    ))
}

/// Scoped lifetime wrapper around the Tesseract handle. The underlying API
/// object frees its native resources on `Drop`, so release is guaranteed no
/// matter how recognition exits.
#[cfg(feature = "ocr")]
struct OcrEngine {
    api: tesseract_rs::TesseractAPI,
}

#[cfg(feature = "ocr")]
impl OcrEngine {
    const BYTES_PER_PIXEL: i32 = 3; // RGB8

    fn acquire() -> AnalystResult<Self> {
        let tessdata = std::env::var("TESSDATA_PREFIX")
            .unwrap_or_else(|_| "/usr/share/tessdata".to_string());
        let api = tesseract_rs::TesseractAPI::new();
        api.init(&tessdata, "eng")
            .map_err(|e| AnalystError::Extraction(e.to_string()))?;
        Ok(Self { api })
    }

    fn recognize(&self, rgb: &[u8], width: i32, height: i32) -> AnalystResult<String> {
        self.api
            .set_image(rgb, width, height, Self::BYTES_PER_PIXEL, Self::BYTES_PER_PIXEL * width)
            .map_err(|e| AnalystError::Extraction(e.to_string()))?;
        self.api
            .get_utf8_text()
            .map_err(|e| AnalystError::Extraction(e.to_string()))
    }
}
