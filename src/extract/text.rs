// file: src/extract/text.rs
// description: format dispatch for resume text extraction
// reference: internal extraction contract

use crate::error::{PipelineError, Result};
use crate::extract::{docx, pdf};
use crate::models::{Document, DocumentFormat};
use tracing::debug;

/// Converts a raw document into plain text by declared format. Pure and
/// synchronous: the same bytes always produce the same text. Empty output
/// is a valid terminal state; only structural failures are errors.
pub struct TextExtractor;

impl TextExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, document: &Document) -> Result<String> {
        // Format check comes first so unsupported files are rejected
        // before any parsing work.
        let format = document.format()?;

        debug!(
            "Extracting text from {} ({})",
            document.file_name,
            format.as_str()
        );

        match format {
            DocumentFormat::Pdf => pdf::extract_text(&document.file_name, &document.bytes),
            DocumentFormat::Docx => docx::extract_text(&document.file_name, &document.bytes),
            DocumentFormat::Txt => self.decode_utf8(&document.file_name, &document.bytes),
        }
    }

    fn decode_utf8(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| PipelineError::Decode {
            file: file_name.to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_txt_verbatim() {
        let extractor = TextExtractor::new();
        let doc = Document::new(
            "resume.txt".to_string(),
            "Python developer with Docker experience".as_bytes().to_vec(),
        );

        let text = extractor.extract(&doc).unwrap();
        assert_eq!(text, "Python developer with Docker experience");
    }

    #[test]
    fn test_extract_empty_txt_is_not_an_error() {
        let extractor = TextExtractor::new();
        let doc = Document::new("empty.txt".to_string(), Vec::new());

        let text = extractor.extract(&doc).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_extract_invalid_utf8_is_decode_error() {
        let extractor = TextExtractor::new();
        let doc = Document::new("binary.txt".to_string(), vec![0xff, 0xfe, 0x80]);

        assert!(matches!(
            extractor.extract(&doc),
            Err(PipelineError::Decode { file, .. }) if file == "binary.txt"
        ));
    }

    #[test]
    fn test_unsupported_format_checked_before_parsing() {
        let extractor = TextExtractor::new();
        let doc = Document::new("tool.exe".to_string(), vec![0x4d, 0x5a]);

        assert!(matches!(
            extractor.extract(&doc),
            Err(PipelineError::UnsupportedFormat(ext)) if ext == "exe"
        ));
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let extractor = TextExtractor::new();
        let doc = Document::new("resume.txt".to_string(), b"same bytes".to_vec());

        let first = extractor.extract(&doc).unwrap();
        let second = extractor.extract(&doc).unwrap();
        assert_eq!(first, second);
    }
}
