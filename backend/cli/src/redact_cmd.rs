//! CLI Redact Command
//!
//! Runs the processing pipeline on a local file and writes the ZIP bundle.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

use redactor_config::RedactorConfig;
use redactor_gateway::{DocumentPipeline, ProcessedDocument};

use crate::output::{note_success, render_summary, supports_color};

pub struct RedactArgs {
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub use_ai: bool,
    pub language: String,
}

pub async fn run(config: &RedactorConfig, args: RedactArgs) -> Result<PathBuf> {
    let bytes = tokio::fs::read(&args.input)
        .await
        .with_context(|| format!("failed to read {}", args.input.display()))?;
    let filename = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let pipeline = DocumentPipeline::from_config(config)?;
    let doc = pipeline
        .process(&bytes, &filename, args.use_ai, &args.language)
        .await
        .with_context(|| format!("failed to process {}", args.input.display()))?;

    let output = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, &doc.bundle.archive_name));
    tokio::fs::write(&output, &doc.bundle.bytes)
        .await
        .with_context(|| format!("failed to write {}", output.display()))?;

    info!(output = %output.display(), bytes = doc.bundle.bytes.len(), "Bundle written");
    note_success(&format!("Wrote {}", output.display()));
    print!("{}", render_summary(&summary_rows(&doc), supports_color()));
    Ok(output)
}

/// The archive goes next to the input file unless a path is given.
pub fn default_output_path(input: &Path, archive_name: &str) -> PathBuf {
    input
        .parent()
        .map(|dir| dir.join(archive_name))
        .unwrap_or_else(|| PathBuf::from(archive_name))
}

fn summary_rows(doc: &ProcessedDocument) -> Vec<(String, String)> {
    let mut rows = vec![
        (
            "File kind".to_string(),
            doc.kind.map(|k| k.as_str()).unwrap_or("unknown").to_string(),
        ),
        ("Read by".to_string(), doc.source.unwrap_or("-").to_string()),
        ("AI cleanup".to_string(), if doc.used_ai { "yes" } else { "no" }.to_string()),
        ("Characters".to_string(), doc.text_chars.to_string()),
        ("Labelled values".to_string(), doc.report.label_hits.to_string()),
    ];
    for (kind, hits) in &doc.report.pattern_hits {
        rows.push((kind.as_str().to_string(), hits.to_string()));
    }
    rows.push(("Masked chars".to_string(), doc.report.masked_chars.to_string()));
    rows.push(("Archive".to_string(), doc.bundle.archive_name.clone()));
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_defaults_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/data/in/scan.pdf"), "scan_cleaned_redacted.zip"),
            PathBuf::from("/data/in/scan_cleaned_redacted.zip")
        );
        assert_eq!(
            default_output_path(Path::new("scan.pdf"), "scan_cleaned_redacted.zip"),
            PathBuf::from("scan_cleaned_redacted.zip")
        );
    }

    #[tokio::test]
    async fn redacts_local_text_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("claim.txt");
        std::fs::write(&input, "Claim Number: 55-1234\nSSN 123-45-6789\n").unwrap();

        let args = RedactArgs {
            input: input.clone(),
            output: None,
            use_ai: false,
            language: "eng".to_string(),
        };
        let written = run(&RedactorConfig::default(), args).await.unwrap();
        assert_eq!(written, dir.path().join("claim_cleaned_redacted.zip"));

        let file = std::fs::File::open(&written).unwrap();
        let archive = zip::ZipArchive::new(file).unwrap();
        let mut names: Vec<_> = archive.file_names().collect();
        names.sort();
        assert_eq!(
            names,
            vec!["claim_cleaned_redacted.docx", "claim_cleaned_redacted.pdf"]
        );
    }

    #[tokio::test]
    async fn missing_input_is_an_error() {
        let args = RedactArgs {
            input: PathBuf::from("/definitely/not/here.txt"),
            output: None,
            use_ai: false,
            language: "eng".to_string(),
        };
        let err = run(&RedactorConfig::default(), args).await.unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
