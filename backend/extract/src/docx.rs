//! DOCX text extraction.
//!
//! Reads `word/document.xml` out of the package and returns one line per
//! paragraph. Table cells and text boxes are paragraphs too, so their text is
//! included.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;

use crate::error::Result;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extract plain text from DOCX bytes, paragraphs joined with `\n`.
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;

    let paragraphs = document_paragraphs(&xml)?;
    debug!(paragraphs = paragraphs.len(), "Parsed DOCX document body");
    Ok(paragraphs.join("\n"))
}

/// Split a WordprocessingML body into paragraph strings.
pub fn document_paragraphs(xml: &str) -> Result<Vec<String>> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    // Open paragraphs; text boxes nest a paragraph inside another.
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.name().as_ref() {
                b"w:p" => open.push(String::new()),
                b"w:t" => in_text = true,
                _ => {}
            },
            Event::Empty(e) => match e.name().as_ref() {
                b"w:p" => paragraphs.push(String::new()),
                b"w:tab" => push_char(&mut open, '\t'),
                b"w:br" | b"w:cr" => push_char(&mut open, '\n'),
                _ => {}
            },
            Event::Text(t) if in_text => {
                let text = t.unescape()?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&text);
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"w:t" => in_text = false,
                b"w:p" => {
                    if let Some(done) = open.pop() {
                        paragraphs.push(done);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_char(open: &mut [String], c: char) {
    if let Some(current) = open.last_mut() {
        current.push(c);
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use zip::write::SimpleFileOptions;

    use super::*;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Name: Jane</w:t></w:r><w:r><w:t xml:space="preserve"> Doe</w:t></w:r></w:p>
    <w:p/>
    <w:p><w:r><w:t>SSN:</w:t><w:tab/><w:t>123-45-6789</w:t></w:r></w:p>
    <w:p><w:r><w:t>Tom &amp; Jerry</w:t><w:br/><w:t>line two</w:t></w:r></w:p>
    <w:p><w:r><w:delText>deleted</w:delText></w:r></w:p>
  </w:body>
</w:document>"#;

    fn docx_with(xml: &str) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(DOCUMENT_PART, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(xml.as_bytes()).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn splits_paragraphs_and_runs() {
        let paragraphs = document_paragraphs(BODY).unwrap();
        assert_eq!(
            paragraphs,
            vec![
                "Name: Jane Doe".to_string(),
                String::new(),
                "SSN:\t123-45-6789".to_string(),
                "Tom & Jerry\nline two".to_string(),
                String::new(),
            ]
        );
    }

    #[test]
    fn reads_from_package() {
        let text = docx_text(&docx_with(BODY)).unwrap();
        assert!(text.starts_with("Name: Jane Doe\n\nSSN:\t123-45-6789"));
    }

    #[test]
    fn rejects_non_zip_bytes() {
        assert!(docx_text(b"plain text, not a package").is_err());
    }
}
