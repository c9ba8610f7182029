use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("failed to write PDF: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
