//! Packs the DOCX and PDF renditions into one ZIP download.

use std::io::{Cursor, Write};

use serde::Serialize;
use tracing::debug;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::docx::write_docx;
use crate::error::Result;
use crate::ir::RedactedDocument;
use crate::pdf::write_pdf;

const OUTPUT_SUFFIX: &str = "_cleaned_redacted";
const FALLBACK_BASE: &str = "document";

/// Finished archive and the name it should be downloaded as.
#[derive(Debug, Clone, Serialize)]
pub struct RedactedBundle {
    pub archive_name: String,
    pub docx_name: String,
    pub pdf_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Base name for output files: the last path component of the upload name
/// with its final extension removed. Leading dots do not count as an
/// extension separator. Quotes and control characters are replaced so the
/// result is safe inside a `Content-Disposition` header.
pub fn base_name(filename: &str) -> String {
    let last = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let stem = match last.rfind('.') {
        Some(idx) if last[..idx].chars().any(|c| c != '.') => &last[..idx],
        _ => last,
    };

    let cleaned: String = stem
        .chars()
        .map(|c| if c == '"' || c.is_control() { '_' } else { c })
        .collect();

    if cleaned.trim().is_empty() {
        FALLBACK_BASE.to_string()
    } else {
        cleaned
    }
}

/// Render `redacted` to DOCX and PDF and zip both under names derived from
/// `filename`.
pub fn bundle(filename: &str, redacted: &str) -> Result<RedactedBundle> {
    let base = base_name(filename);
    let doc = RedactedDocument::from_text(redacted);

    let docx = write_docx(&doc)?;
    let pdf = write_pdf(&doc)?;

    let docx_name = format!("{base}{OUTPUT_SUFFIX}.docx");
    let pdf_name = format!("{base}{OUTPUT_SUFFIX}.pdf");

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut zip = zip::ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file(docx_name.as_str(), options)?;
    zip.write_all(&docx)?;
    zip.start_file(pdf_name.as_str(), options)?;
    zip.write_all(&pdf)?;
    let bytes = zip.finish()?.into_inner();

    debug!(
        docx_bytes = docx.len(),
        pdf_bytes = pdf.len(),
        archive_bytes = bytes.len(),
        "Bundle rendered"
    );

    Ok(RedactedBundle {
        archive_name: format!("{base}{OUTPUT_SUFFIX}.zip"),
        docx_name,
        pdf_name,
        bytes,
    })
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;

    #[test]
    fn base_name_strips_last_extension_and_directories() {
        assert_eq!(base_name("report.pdf"), "report");
        assert_eq!(base_name("archive.tar.gz"), "archive.tar");
        assert_eq!(base_name("README"), "README");
        assert_eq!(base_name(".env"), ".env");
        assert_eq!(base_name("../../etc/passwd.txt"), "passwd");
        assert_eq!(base_name(r"C:\Users\me\scan.PNG"), "scan");
    }

    #[test]
    fn base_name_is_header_safe() {
        assert_eq!(base_name("a\"b.txt"), "a_b");
        assert_eq!(base_name("line\nbreak.txt"), "line_break");
        assert_eq!(base_name(""), "document");
        assert_eq!(base_name("dir/"), "document");
    }

    #[test]
    fn archive_holds_both_renditions() {
        let bundle = bundle("patient.txt", "SSN: ███████████").unwrap();
        assert_eq!(bundle.archive_name, "patient_cleaned_redacted.zip");

        let mut archive = zip::ZipArchive::new(Cursor::new(bundle.bytes.as_slice())).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec!["patient_cleaned_redacted.docx", "patient_cleaned_redacted.pdf"]
        );

        let mut pdf = Vec::new();
        archive
            .by_name("patient_cleaned_redacted.pdf")
            .unwrap()
            .read_to_end(&mut pdf)
            .unwrap();
        assert!(pdf.starts_with(b"%PDF-"));

        let mut docx = Vec::new();
        archive
            .by_name("patient_cleaned_redacted.docx")
            .unwrap()
            .read_to_end(&mut docx)
            .unwrap();
        assert!(docx.starts_with(b"PK"));
    }
}
