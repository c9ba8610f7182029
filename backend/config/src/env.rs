//! Environment variable loading.
//!
//! Empty or whitespace-only values are treated as unset so that
//! `OCR_API_KEY=` in a compose file disables the backend instead of sending a
//! blank key.

use std::collections::HashMap;
use std::str::FromStr;

use crate::schema::RedactorConfig;

/// Error returned when a variable is set but cannot be parsed.
#[derive(Debug, thiserror::Error)]
#[error("Invalid value {value:?} for env var \"{var_name}\": expected {expected}")]
pub struct InvalidEnvVarError {
    pub var_name: String,
    pub value: String,
    pub expected: &'static str,
}

impl RedactorConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, InvalidEnvVarError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from a provided map (useful for testing).
    pub fn from_map(env: &HashMap<String, String>) -> Result<Self, InvalidEnvVarError> {
        Self::from_lookup(|key| env.get(key).cloned())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, InvalidEnvVarError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = RedactorConfig::default();

        if let Some(bind) = get("BIND_ADDRESS") {
            config.server.bind_address = bind;
        }
        parse_into(&get, "PORT", "a port number", &mut config.server.port)?;

        config.ocr.api_key = get("OCR_API_KEY");
        if let Some(url) = get("OCR_API_URL") {
            config.ocr.api_url = url;
        }
        parse_into(&get, "OCR_ENGINE", "an OCR engine number", &mut config.ocr.engine)?;
        parse_into(
            &get,
            "OCR_TIMEOUT_SECS",
            "a number of seconds",
            &mut config.ocr.timeout_secs,
        )?;
        if let Some(cmd) = get("TESSERACT_CMD") {
            config.ocr.tesseract_cmd = cmd;
        }
        if let Some(cmd) = get("PDFTOPPM_CMD") {
            config.ocr.pdftoppm_cmd = cmd;
        }
        parse_into(&get, "OCR_DPI", "a resolution in dpi", &mut config.ocr.dpi)?;

        config.gemini.api_key = get("GEMINI_API_KEY");
        if let Some(model) = get("GEMINI_MODEL") {
            config.gemini.model = model;
        }
        if let Some(base) = get("GEMINI_API_BASE") {
            config.gemini.api_base = base.trim_end_matches('/').to_string();
        }

        parse_into(
            &get,
            "MAX_UPLOAD_BYTES",
            "a size in bytes",
            &mut config.limits.max_upload_bytes,
        )?;

        if let Some(level) = get("RUST_LOG") {
            config.logging.level = level;
        }
        config.logging.dir = get("LOG_DIR");

        Ok(config)
    }
}

fn parse_into<G, T>(
    get: &G,
    var_name: &str,
    expected: &'static str,
    slot: &mut T,
) -> Result<(), InvalidEnvVarError>
where
    G: Fn(&str) -> Option<String>,
    T: FromStr,
{
    let Some(raw) = get(var_name) else {
        return Ok(());
    };
    *slot = raw.parse().map_err(|_| InvalidEnvVarError {
        var_name: var_name.to_string(),
        value: raw,
        expected,
    })?;
    Ok(())
}
