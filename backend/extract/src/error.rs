use thiserror::Error;

/// Failures of a single extraction backend.
///
/// The pipeline logs these and moves on to the next backend; they only reach
/// callers that invoke a backend directly.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("unsupported file type: {0}")]
    UnsupportedFile(String),

    #[error("invalid OCR language code: {0:?}")]
    InvalidLanguage(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OCR.space reported an error: {0}")]
    OcrSpace(String),

    #[error("`{cmd}` failed: {message}")]
    Subprocess { cmd: String, message: String },

    #[error("`{cmd}` timed out after {secs}s")]
    Timeout { cmd: String, secs: u64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed DOCX archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("malformed DOCX XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Gemini request failed: {0}")]
    Gemini(String),
}

pub type Result<T> = std::result::Result<T, ExtractError>;
