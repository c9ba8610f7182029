//! Unified extraction pipeline.
//!
//! Text and DOCX files are read directly. Images and PDFs go through the OCR
//! backends in order until one returns non-blank text. Backend failures are
//! logged and treated as "no text"; the caller decides what an empty result
//! means.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use redactor_config::OcrConfig;

use crate::docx::docx_text;
use crate::file_kind::{detect_file_kind, FileKind};
use crate::ocr::OcrBackend;
use crate::ocr_space::OcrSpaceClient;
use crate::tesseract::TesseractOcr;
use crate::text::decode_utf8_ignoring_errors;

/// Outcome of one extraction.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction {
    pub kind: Option<FileKind>,
    /// Which reader produced `text` ("text", "docx" or an OCR backend name).
    pub source: Option<&'static str>,
    pub text: String,
}

impl Extraction {
    fn empty(kind: Option<FileKind>) -> Self {
        Self {
            kind,
            source: None,
            text: String::new(),
        }
    }

    /// True when no usable text came out.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[derive(Clone)]
pub struct Extractor {
    ocr_backends: Vec<Arc<dyn OcrBackend>>,
}

impl Extractor {
    pub fn new(ocr_backends: Vec<Arc<dyn OcrBackend>>) -> Self {
        Self { ocr_backends }
    }

    /// OCR.space first when a key is configured, then local Tesseract.
    pub fn from_config(config: &OcrConfig, client: reqwest::Client) -> Self {
        let mut backends: Vec<Arc<dyn OcrBackend>> = Vec::new();
        if let Some(remote) = OcrSpaceClient::from_config(client, config) {
            backends.push(Arc::new(remote));
        }
        if !config.tesseract_cmd.trim().is_empty() {
            backends.push(Arc::new(TesseractOcr::from_config(config)));
        }
        Self::new(backends)
    }

    pub fn backend_names(&self) -> Vec<&'static str> {
        self.ocr_backends.iter().map(|b| b.name()).collect()
    }

    /// Extract text from an uploaded document.
    pub async fn extract(&self, bytes: &[u8], filename: &str, language: &str) -> Extraction {
        let kind = detect_file_kind(filename);
        if let Some(ocr_kind) = kind.filter(FileKind::needs_ocr) {
            return self.run_ocr(bytes, filename, ocr_kind, language).await;
        }

        match kind {
            Some(FileKind::Text) => Extraction {
                kind,
                source: Some("text"),
                text: decode_utf8_ignoring_errors(bytes),
            },
            Some(FileKind::Docx) => match docx_text(bytes) {
                Ok(text) => Extraction {
                    kind,
                    source: Some("docx"),
                    text,
                },
                Err(e) => {
                    warn!(error = %e, "DOCX extraction failed");
                    Extraction::empty(kind)
                }
            },
            _ => {
                info!(filename, "Unsupported file type");
                Extraction::empty(None)
            }
        }
    }

    /// [`extract`](Self::extract), returning only the text.
    pub async fn extract_text(&self, bytes: &[u8], filename: &str, language: &str) -> String {
        self.extract(bytes, filename, language).await.text
    }

    async fn run_ocr(
        &self,
        bytes: &[u8],
        filename: &str,
        kind: FileKind,
        language: &str,
    ) -> Extraction {
        for backend in &self.ocr_backends {
            match backend.recognize(bytes, filename, kind, language).await {
                Ok(text) if !text.trim().is_empty() => {
                    info!(backend = backend.name(), chars = text.chars().count(), "OCR succeeded");
                    return Extraction {
                        kind: Some(kind),
                        source: Some(backend.name()),
                        text,
                    };
                }
                Ok(_) => debug!(backend = backend.name(), "OCR returned no text"),
                Err(e) => warn!(backend = backend.name(), error = %e, "OCR backend failed"),
            }
        }
        Extraction::empty(Some(kind))
    }
}
