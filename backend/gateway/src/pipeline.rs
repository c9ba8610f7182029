//! End-to-end document processing shared by the HTTP API and the CLI.
//!
//! extract -> optional AI cleanup -> redact -> render DOCX/PDF -> zip

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use thiserror::Error;
use tracing::{debug, info, warn};

use redactor_config::RedactorConfig;
use redactor_extract::{validate_language, Extractor, FileKind, GeminiCleaner};
use redactor_redaction::{redact_with_report, RedactionReport};
use redactor_render::{bundle, RedactedBundle, RenderError};

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Empty file")]
    EmptyFile,

    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    #[error("Failed to extract text from file.")]
    NoText,

    #[error("failed to render output: {0}")]
    Render(#[from] RenderError),

    #[error("render task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Everything produced for one document.
#[derive(Debug)]
pub struct ProcessedDocument {
    pub bundle: RedactedBundle,
    pub kind: Option<FileKind>,
    pub source: Option<&'static str>,
    pub used_ai: bool,
    pub text_chars: usize,
    pub report: RedactionReport,
    pub elapsed: Duration,
}

pub struct DocumentPipeline {
    extractor: Extractor,
    cleaner: Option<Arc<GeminiCleaner>>,
}

impl DocumentPipeline {
    pub fn new(extractor: Extractor, cleaner: Option<GeminiCleaner>) -> Self {
        Self {
            extractor,
            cleaner: cleaner.map(Arc::new),
        }
    }

    /// Wire OCR backends and the optional Gemini cleaner from config. One
    /// HTTP client is shared by every remote call.
    pub fn from_config(config: &RedactorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("redactor/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;

        let extractor = Extractor::from_config(&config.ocr, client.clone());
        let cleaner = GeminiCleaner::from_config(client, &config.gemini);

        if extractor.backend_names().is_empty() {
            warn!("No OCR backend configured; images and PDFs will be rejected");
        }
        info!(
            ocr_backends = ?extractor.backend_names(),
            gemini_model = cleaner.as_ref().map(|c| c.model()),
            "Processing pipeline ready"
        );

        Ok(Self::new(extractor, cleaner))
    }

    pub fn ai_available(&self) -> bool {
        self.cleaner.is_some()
    }

    /// Run one uploaded document through the whole pipeline.
    pub async fn process(
        &self,
        bytes: &[u8],
        filename: &str,
        use_ai: bool,
        language: &str,
    ) -> Result<ProcessedDocument, PipelineError> {
        let started = Instant::now();

        if bytes.is_empty() {
            return Err(PipelineError::EmptyFile);
        }
        validate_language(language)
            .map_err(|_| PipelineError::InvalidLanguage(language.to_string()))?;

        let extraction = self.extractor.extract(bytes, filename, language).await;
        if extraction.is_blank() {
            return Err(PipelineError::NoText);
        }
        let (kind, source) = (extraction.kind, extraction.source);
        let mut text = extraction.text;
        debug!(chars = text.chars().count(), ?source, "Text extracted");

        let used_ai = match (&self.cleaner, use_ai) {
            (Some(cleaner), true) => {
                text = cleaner.clean_or_keep(text).await;
                true
            }
            (None, true) => {
                warn!("AI cleanup requested but GEMINI_API_KEY is not set; skipping");
                false
            }
            (_, false) => false,
        };
        let text_chars = text.chars().count();

        // Regex passes and document layout are CPU-bound.
        let filename = filename.to_string();
        let (report, bundle) = tokio::task::spawn_blocking(move || {
            let redaction = redact_with_report(&text);
            bundle(&filename, &redaction.text).map(|b| (redaction.report, b))
        })
        .await??;

        Ok(ProcessedDocument {
            bundle,
            kind,
            source,
            used_ai,
            text_chars,
            report,
            elapsed: started.elapsed(),
        })
    }
}
