//! Config validation: field checks with user-friendly error messages.

use crate::schema::RedactorConfig;
use thiserror::Error;

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &RedactorConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    validate_server(config, &mut report);
    validate_ocr(config, &mut report);
    validate_gemini(config, &mut report);
    validate_limits(config, &mut report);
    report
}

fn validate_server(config: &RedactorConfig, report: &mut ValidationReport) {
    if config.server.port == 0 {
        report.error("server.port", "port must be > 0");
    }
    if config.server.bind_address.trim().is_empty() {
        report.error("server.bindAddress", "bind address cannot be empty");
    }
}

fn validate_ocr(config: &RedactorConfig, report: &mut ValidationReport) {
    let ocr = &config.ocr;
    if !(50..=1200).contains(&ocr.dpi) {
        report.error("ocr.dpi", format!("dpi {} is outside 50..=1200", ocr.dpi));
    }
    if ocr.timeout_secs == 0 {
        report.error("ocr.timeoutSecs", "timeout must be > 0");
    }
    if !(1..=3).contains(&ocr.engine) {
        report.warn("ocr.engine", format!("unknown OCR.space engine {}", ocr.engine));
    }
    if ocr.api_key.is_some() && !ocr.api_url.starts_with("http") {
        report.error("ocr.apiUrl", "OCR API URL must be http(s)");
    }
    if ocr.api_key.is_none() && ocr.tesseract_cmd.trim().is_empty() {
        report.warn(
            "ocr",
            "No OCR backend configured; image and PDF uploads will fail to extract",
        );
    }
}

fn validate_gemini(config: &RedactorConfig, report: &mut ValidationReport) {
    let gemini = &config.gemini;
    if gemini.is_enabled() && gemini.model.trim().is_empty() {
        report.error("gemini.model", "model cannot be empty when an API key is set");
    }
}

fn validate_limits(config: &RedactorConfig, report: &mut ValidationReport) {
    if config.limits.max_upload_bytes == 0 {
        report.error("limits.maxUploadBytes", "upload limit must be > 0");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let report = validate(&RedactorConfig::default());
        assert!(report.is_valid(), "{:?}", report.errors);
    }

    #[test]
    fn flags_zero_port_and_bad_dpi() {
        let mut cfg = RedactorConfig::default();
        cfg.server.port = 0;
        cfg.ocr.dpi = 10;
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 2);
        assert!(report.errors.iter().any(|e| e.path == "server.port"));
        assert!(report.errors.iter().any(|e| e.path == "ocr.dpi"));
    }

    #[test]
    fn warns_without_any_ocr_backend() {
        let mut cfg = RedactorConfig::default();
        cfg.ocr.tesseract_cmd = String::new();
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
    }
}
