//! PDF probing: page count, embedded-text extraction and classification.
//!
//! The core does no OCR or layout parsing. A PDF with usable embedded text
//! is submitted to the inference backend as text; everything else travels
//! as raw bytes.

use lopdf::Document;
use tracing::debug;

use crate::error::PdfError;

/// Classification of a loaded PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfKind {
    /// Has enough embedded text to submit as text.
    Text,
    /// Little or no embedded text; likely a scanned document.
    Scanned,
    /// No pages or no content at all.
    Empty,
}

/// A loaded PDF document.
pub struct PdfDocument {
    data: Vec<u8>,
    page_count: u32,
}

impl PdfDocument {
    /// Load a PDF from bytes.
    pub fn load(data: &[u8]) -> Result<Self, PdfError> {
        let document = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let page_count = document.get_pages().len() as u32;
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF: {} pages, {} bytes", page_count, data.len());

        Ok(Self {
            data: data.to_vec(),
            page_count,
        })
    }

    /// Number of pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// The raw PDF bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Extract the embedded text of the whole document.
    pub fn extract_text(&self) -> Result<String, PdfError> {
        pdf_extract::extract_text_from_mem(&self.data)
            .map(|text| text.trim().to_string())
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Classify the document by how much embedded text it carries.
    pub fn classify(&self, min_text_length: usize) -> PdfKind {
        match self.extract_text() {
            Ok(text) if text.len() >= min_text_length => PdfKind::Text,
            Ok(text) if text.is_empty() => PdfKind::Empty,
            Ok(_) => PdfKind::Scanned,
            Err(_) => PdfKind::Scanned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage() {
        let result = PdfDocument::load(b"this is not a pdf");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_rejects_empty() {
        let result = PdfDocument::load(&[]);
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }
}
