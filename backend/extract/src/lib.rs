//! Text extraction for uploaded documents.
//!
//! Plain text and DOCX are read directly; images and PDFs go through OCR
//! (OCR.space when configured, local Tesseract otherwise). Extracted text can
//! optionally be tidied by a Gemini model before redaction.

pub mod docx;
pub mod error;
pub mod file_kind;
pub mod gemini;
pub mod ocr;
pub mod ocr_space;
pub mod pipeline;
pub mod tesseract;
pub mod text;

pub use docx::docx_text;
pub use error::ExtractError;
pub use file_kind::{detect_file_kind, FileKind};
pub use gemini::GeminiCleaner;
pub use ocr::{validate_language, OcrBackend};
pub use ocr_space::OcrSpaceClient;
pub use pipeline::{Extraction, Extractor};
pub use tesseract::TesseractOcr;
pub use text::decode_utf8_ignoring_errors;
