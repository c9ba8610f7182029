//! Output rendering for redacted documents.
//!
//! Redacted text is laid out as a titled DOCX and a paginated PDF, and both
//! are packed into a single ZIP archive for download.

pub mod bundle;
pub mod docx;
pub mod error;
pub mod ir;
pub mod pdf;

pub use bundle::{base_name, bundle, RedactedBundle};
pub use docx::write_docx;
pub use error::RenderError;
pub use ir::{split_lines, RedactedDocument, DOCUMENT_TITLE};
pub use pdf::write_pdf;
