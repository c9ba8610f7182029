//! HTTP API for the document redactor.
//!
//! `GET /health` for liveness and `POST /process` to turn an uploaded
//! document into a ZIP of redacted DOCX and PDF files. The processing
//! pipeline is also used directly by the CLI.

pub mod error;
pub mod health_api;
pub mod pipeline;
pub mod process_api;
pub mod server;
pub mod upload;

pub use error::ApiError;
pub use pipeline::{DocumentPipeline, PipelineError, ProcessedDocument};
pub use server::{build_router, start_server, AppState};
