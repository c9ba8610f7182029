//! `redactor-config` — runtime configuration for the redaction service.
//!
//! Provides:
//! - Typed config schema (server, OCR, Gemini, limits, logging)
//! - Environment loading with defaults
//! - Validation with errors and warnings
//! - Secret masking for safe logging

pub mod defaults;
pub mod env;
pub mod redact;
pub mod schema;
pub mod validation;

pub use defaults::DEFAULT_LANGUAGE;
pub use env::InvalidEnvVarError;
pub use redact::redact;
pub use schema::{GeminiConfig, LimitsConfig, LoggingConfig, OcrConfig, RedactorConfig, ServerConfig};
pub use validation::{validate, ConfigValidationError, ValidationReport};

use anyhow::{bail, Result};

/// Validate a loaded config, logging every warning and error.
///
/// Call after the logger is installed so the report is visible.
pub fn check(config: &RedactorConfig) -> Result<()> {
    let report = validate(config);
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
    if !report.is_valid() {
        bail!("{} configuration error(s)", report.errors.len());
    }
    Ok(())
}
