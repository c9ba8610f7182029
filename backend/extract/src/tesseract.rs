//! Local OCR through the Tesseract and Poppler command-line tools.
//!
//! Images go straight to `tesseract`; PDFs are rasterised page by page with
//! `pdftoppm` first. All intermediate files live in a temporary directory
//! removed when the call returns.

use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use redactor_config::{OcrConfig, DEFAULT_LANGUAGE};

use crate::error::{ExtractError, Result};
use crate::file_kind::{extension, FileKind};
use crate::ocr::{validate_language, OcrBackend};

pub struct TesseractOcr {
    tesseract_cmd: String,
    pdftoppm_cmd: String,
    dpi: u32,
    timeout: Duration,
}

impl TesseractOcr {
    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            tesseract_cmd: config.tesseract_cmd.clone(),
            pdftoppm_cmd: config.pdftoppm_cmd.clone(),
            dpi: config.dpi,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// OCR one image. Upload forms may carry OCR.space codes (`ger`, `chs`,
    /// `auto`) that have no local traineddata; if Tesseract fails with such a
    /// code the image is read again with the default language.
    async fn ocr_image(&self, image: &Path, language: &str) -> Result<String> {
        match self.run_tesseract(image, language).await {
            Err(ExtractError::Subprocess { message, .. }) if language != DEFAULT_LANGUAGE => {
                warn!(
                    language,
                    fallback = DEFAULT_LANGUAGE,
                    error = %message,
                    "Tesseract failed with requested language; retrying"
                );
                self.run_tesseract(image, DEFAULT_LANGUAGE).await
            }
            result => result,
        }
    }

    async fn run_tesseract(&self, image: &Path, language: &str) -> Result<String> {
        let mut cmd = Command::new(&self.tesseract_cmd);
        cmd.arg(image).arg("stdout").arg("-l").arg(language);
        let stdout = self.run(cmd, &self.tesseract_cmd).await?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Rasterise every page of `pdf` into `out_dir`, returning the images in page order.
    async fn rasterise(&self, pdf: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut cmd = Command::new(&self.pdftoppm_cmd);
        cmd.arg("-r")
            .arg(self.dpi.to_string())
            .arg("-png")
            .arg(pdf)
            .arg(out_dir.join("page"));
        self.run(cmd, &self.pdftoppm_cmd).await?;

        let mut pages = Vec::new();
        let mut entries = tokio::fs::read_dir(out_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if let Some(number) = page_number(&path) {
                pages.push((number, path));
            }
        }
        pages.sort_by_key(|(number, _)| *number);
        Ok(pages.into_iter().map(|(_, path)| path).collect())
    }

    async fn run(&self, mut cmd: Command, name: &str) -> Result<Vec<u8>> {
        cmd.stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(result) => result.map_err(|e| ExtractError::Subprocess {
                cmd: name.to_string(),
                message: e.to_string(),
            })?,
            Err(_) => {
                return Err(ExtractError::Timeout {
                    cmd: name.to_string(),
                    secs: self.timeout.as_secs(),
                });
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ExtractError::Subprocess {
                cmd: name.to_string(),
                message: format!("{} ({})", stderr.trim(), output.status),
            });
        }
        Ok(output.stdout)
    }
}

/// `page-3.png` / `page-03.png` -> 3
fn page_number(path: &Path) -> Option<u32> {
    if path.extension()?.to_str()? != "png" {
        return None;
    }
    path.file_stem()?
        .to_str()?
        .strip_prefix("page-")?
        .parse()
        .ok()
}

#[async_trait]
impl OcrBackend for TesseractOcr {
    fn name(&self) -> &'static str {
        "tesseract"
    }

    async fn recognize(
        &self,
        bytes: &[u8],
        filename: &str,
        kind: FileKind,
        language: &str,
    ) -> Result<String> {
        validate_language(language)?;
        let workdir = tempfile::tempdir()?;
        let input = workdir.path().join(format!("input.{}", extension(filename)));
        tokio::fs::write(&input, bytes).await?;

        match kind {
            FileKind::Image => {
                info!(bytes = bytes.len(), "Running Tesseract on image");
                self.ocr_image(&input, language).await
            }
            FileKind::Pdf => {
                let pages_dir = workdir.path().join("pages");
                tokio::fs::create_dir(&pages_dir).await?;
                let pages = self.rasterise(&input, &pages_dir).await?;
                info!(pages = pages.len(), dpi = self.dpi, "Running Tesseract on PDF pages");

                let mut text = String::new();
                for page in &pages {
                    text.push_str(&self.ocr_image(page, language).await?);
                    text.push('\n');
                }
                debug!(chars = text.len(), "Tesseract finished");
                Ok(text)
            }
            other => Err(ExtractError::UnsupportedFile(other.as_str().to_string())),
        }
    }
}
