//! File type detection by upload filename.

use serde::Serialize;

/// Document kinds the pipeline knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Image,
    Pdf,
    Text,
    Docx,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileKind::Image => "image",
            FileKind::Pdf => "pdf",
            FileKind::Text => "text",
            FileKind::Docx => "docx",
        }
    }

    /// Kinds whose text has to come from OCR.
    pub fn needs_ocr(&self) -> bool {
        matches!(self, FileKind::Image | FileKind::Pdf)
    }
}

/// Lower-cased text after the last `.`, or the whole name when there is none.
pub fn extension(filename: &str) -> String {
    filename
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_lowercase()
}

/// Detect the document kind from the filename extension.
pub fn detect_file_kind(filename: &str) -> Option<FileKind> {
    match extension(filename).as_str() {
        "jpg" | "jpeg" | "png" | "bmp" | "tiff" | "tif" => Some(FileKind::Image),
        "pdf" => Some(FileKind::Pdf),
        "txt" => Some(FileKind::Text),
        "docx" => Some(FileKind::Docx),
        _ => None,
    }
}
