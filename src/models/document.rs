// file: src/models/document.rs
// description: core resume document model with format sniffing and content hashing
// reference: internal data structures

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentFormat {
    Pdf,
    Docx,
    Txt,
}

impl DocumentFormat {
    /// Resolve a declared format string (a lowercase file extension) into a
    /// supported format. Rejection happens here, before any parsing.
    pub fn from_extension(extension: &str) -> Result<Self> {
        match extension.to_lowercase().as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            "txt" => Ok(DocumentFormat::Txt),
            other => Err(PipelineError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
            DocumentFormat::Txt => "txt",
        }
    }
}

/// A candidate resume as received: identifier, raw bytes, and the format
/// declared by its file extension. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub declared_format: String,
    pub content_hash: String,
    pub file_size: u64,
    pub received_at: u64,
}

impl Document {
    pub fn new(file_name: String, bytes: Vec<u8>) -> Self {
        let declared_format = Path::new(&file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        let content_hash = Self::compute_hash(&bytes);
        let file_size = bytes.len() as u64;
        let received_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs();

        Self {
            file_name,
            bytes,
            declared_format,
            content_hash,
            file_size,
            received_at,
        }
    }

    pub fn format(&self) -> Result<DocumentFormat> {
        DocumentFormat::from_extension(&self.declared_format)
    }

    fn compute_hash(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_creation() {
        let doc = Document::new("resume.pdf".to_string(), b"%PDF-1.4".to_vec());

        assert_eq!(doc.file_name, "resume.pdf");
        assert_eq!(doc.declared_format, "pdf");
        assert!(!doc.content_hash.is_empty());
        assert_eq!(doc.file_size, 8);
        assert_eq!(doc.format().unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_format_sniffing_case_insensitive() {
        let doc = Document::new("Resume.PDF".to_string(), vec![]);
        assert_eq!(doc.format().unwrap(), DocumentFormat::Pdf);
    }

    #[test]
    fn test_unsupported_format_rejected() {
        let doc = Document::new("payload.exe".to_string(), vec![]);
        assert!(matches!(
            doc.format(),
            Err(PipelineError::UnsupportedFormat(ext)) if ext == "exe"
        ));

        let no_extension = Document::new("resume".to_string(), vec![]);
        assert!(no_extension.format().is_err());
    }

    #[test]
    fn test_hash_consistency() {
        let hash1 = Document::compute_hash(b"Test content");
        let hash2 = Document::compute_hash(b"Test content");
        assert_eq!(hash1, hash2);
    }
}
