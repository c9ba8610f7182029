//! OCR backend abstraction.

use async_trait::async_trait;

use crate::error::{ExtractError, Result};
use crate::file_kind::FileKind;

/// Something that can read text out of an image or PDF.
#[async_trait]
pub trait OcrBackend: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Extract text from `bytes`. `kind` is always [`FileKind::Image`] or
    /// [`FileKind::Pdf`].
    async fn recognize(
        &self,
        bytes: &[u8],
        filename: &str,
        kind: FileKind,
        language: &str,
    ) -> Result<String>;
}

/// Accept Tesseract-style language codes such as `eng` or `eng+deu`.
pub fn validate_language(language: &str) -> Result<()> {
    let valid = !language.is_empty()
        && language.len() <= 64
        && language
            .split('+')
            .all(|code| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'));
    if valid {
        Ok(())
    } else {
        Err(ExtractError::InvalidLanguage(language.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_language_codes() {
        assert!(validate_language("eng").is_ok());
        assert!(validate_language("eng+deu").is_ok());
        assert!(validate_language("chi_sim").is_ok());
    }

    #[test]
    fn rejects_option_like_codes() {
        assert!(validate_language("").is_err());
        assert!(validate_language("--psm").is_err());
        assert!(validate_language("eng+").is_err());
        assert!(validate_language("eng; rm").is_err());
    }
}
