// file: src/extract/pdf.rs
// description: pdf text extraction from in-memory bytes
// reference: https://docs.rs/pdf-extract

use crate::error::{PipelineError, Result};

/// Extract the text layer from a PDF, all pages concatenated in page order.
/// A PDF with no text layer (scanned images) yields an empty string, which
/// is a valid result. Structural parse failures are extraction errors.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| PipelineError::Extraction {
        file: file_name.to_string(),
        message: e.to_string(),
    })
}
