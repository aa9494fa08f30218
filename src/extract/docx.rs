// file: src/extract/docx.rs
// description: docx body text extraction via the word/document.xml part
// reference: https://docs.rs/zip, https://docs.rs/quick-xml

use crate::error::{PipelineError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;
use std::io::{Cursor, Read};

/// Extract the document body as a single string. Text is taken from `w:t`
/// runs; paragraph ends and explicit breaks become newlines, tabs become
/// tabs. A body with no text runs yields an empty string.
pub fn extract_text(file_name: &str, bytes: &[u8]) -> Result<String> {
    let xml = read_document_part(file_name, bytes)?;
    collect_body_text(file_name, &xml)
}

fn read_document_part(file_name: &str, bytes: &[u8]) -> Result<String> {
    let mut archive =
        zip::ZipArchive::new(Cursor::new(bytes)).map_err(|e| PipelineError::Extraction {
            file: file_name.to_string(),
            message: format!("not a valid docx archive: {}", e),
        })?;

    let mut part =
        archive
            .by_name("word/document.xml")
            .map_err(|e| PipelineError::Extraction {
                file: file_name.to_string(),
                message: format!("missing word/document.xml: {}", e),
            })?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| PipelineError::Extraction {
            file: file_name.to_string(),
            message: format!("unreadable word/document.xml: {}", e),
        })?;

    Ok(xml)
}

fn collect_body_text(file_name: &str, xml: &str) -> Result<String> {
    let mut reader = Reader::from_str(xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"w:t" => in_text_run = false,
            Ok(Event::End(e)) if e.name().as_ref() == b"w:p" => text.push('\n'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:tab" => text.push('\t'),
            Ok(Event::Empty(e)) if e.name().as_ref() == b"w:br" => text.push('\n'),
            Ok(Event::Text(e)) if in_text_run => {
                let run = e.unescape().map_err(|err| PipelineError::Extraction {
                    file: file_name.to_string(),
                    message: format!("malformed text run: {}", err),
                })?;
                text.push_str(&run);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(PipelineError::Extraction {
                    file: file_name.to_string(),
                    message: format!("malformed document xml: {}", e),
                });
            }
            _ => {}
        }
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    fn build_docx(document_xml: &str) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_extract_paragraph_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Senior Python engineer</w:t></w:r></w:p>
    <w:p><w:r><w:t>AWS certified</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = extract_text("resume.docx", &build_docx(xml)).unwrap();
        assert!(text.contains("Senior Python engineer"));
        assert!(text.contains("AWS certified"));
    }

    #[test]
    fn test_paragraphs_separated_by_newline() {
        let xml = r#"<w:document xmlns:w="http://example.com/w">
  <w:body>
    <w:p><w:r><w:t>first</w:t></w:r></w:p>
    <w:p><w:r><w:t>second</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = extract_text("resume.docx", &build_docx(xml)).unwrap();
        assert!(text.contains("first\n"));
        assert!(!text.contains("firstsecond"));
    }

    #[test]
    fn test_empty_body_yields_empty_text() {
        let xml = r#"<w:document xmlns:w="http://example.com/w"><w:body></w:body></w:document>"#;
        let text = extract_text("empty.docx", &build_docx(xml)).unwrap();
        assert!(text.trim().is_empty());
    }

    #[test]
    fn test_entities_unescaped() {
        let xml =
            r#"<w:document><w:body><w:p><w:r><w:t>C&amp;D analysis</w:t></w:r></w:p></w:body></w:document>"#;
        let text = extract_text("resume.docx", &build_docx(xml)).unwrap();
        assert!(text.contains("C&D analysis"));
    }

    #[test]
    fn test_not_a_zip_fails() {
        let result = extract_text("fake.docx", b"plain bytes, no archive");
        assert!(matches!(
            result,
            Err(PipelineError::Extraction { file, .. }) if file == "fake.docx"
        ));
    }

    #[test]
    fn test_zip_without_document_part_fails() {
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut cursor);
            writer
                .start_file("unrelated.txt", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }

        let result = extract_text("odd.docx", &cursor.into_inner());
        assert!(result.is_err());
    }
}
