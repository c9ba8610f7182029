//! CLI Doctor Command
//!
//! Checks configuration and the external OCR tools.

use std::process::Stdio;

use anyhow::{bail, Result};
use tokio::process::Command;

use redactor_config::{validate, RedactorConfig};

use crate::output::{note_error, note_info, note_success, note_warn};

pub async fn run(config: &RedactorConfig) -> Result<()> {
    println!("\nRunning redactor doctor...\n");

    let report = validate(config);
    for warning in &report.warnings {
        note_warn(&format!("{}: {}", warning.path, warning.message));
    }
    for error in &report.errors {
        note_error(&format!("{}: {}", error.path, error.message));
    }
    if report.is_valid() {
        note_success("Configuration is valid");
    }

    let tesseract = check_tool("tesseract", &config.ocr.tesseract_cmd, "--version").await;
    let pdftoppm = check_tool("pdftoppm", &config.ocr.pdftoppm_cmd, "-v").await;

    if config.ocr.api_key.is_some() {
        note_success("OCR_API_KEY is set; OCR.space will be tried first");
    } else {
        note_info("OCR_API_KEY is not set; only local Tesseract is used");
    }
    if config.gemini.is_enabled() {
        note_success(&format!("Gemini cleanup available ({})", config.gemini.model));
    } else {
        note_info("GEMINI_API_KEY is not set; use_ai requests are ignored");
    }

    if !tesseract && config.ocr.api_key.is_none() {
        note_warn("No OCR backend is usable; images and PDFs cannot be processed");
    } else if tesseract && !pdftoppm && config.ocr.api_key.is_none() {
        note_warn("pdftoppm is missing; PDFs cannot be processed");
    }

    println!();
    if !report.is_valid() {
        bail!("{} configuration error(s)", report.errors.len());
    }
    note_success("All required checks passed");
    Ok(())
}

async fn check_tool(label: &str, cmd: &str, version_arg: &str) -> bool {
    if tool_available(cmd, version_arg).await {
        note_success(&format!("{label} found ({cmd})"));
        true
    } else {
        note_warn(&format!("{label} not found ({cmd})"));
        false
    }
}

/// A tool counts as present when it can be spawned; the exit status of the
/// version probe varies between builds.
async fn tool_available(cmd: &str, version_arg: &str) -> bool {
    if cmd.trim().is_empty() {
        return false;
    }
    Command::new(cmd)
        .arg(version_arg)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .await
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_tool_is_reported() {
        assert!(!tool_available("redactor-no-such-binary", "--version").await);
        assert!(!tool_available("  ", "--version").await);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn spawnable_tool_is_found() {
        assert!(tool_available("sh", "-c").await);
    }

    #[tokio::test]
    async fn invalid_config_fails() {
        let mut config = RedactorConfig::default();
        config.server.port = 0;
        assert!(run(&config).await.is_err());
    }
}
