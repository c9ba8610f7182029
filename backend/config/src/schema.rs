//! Runtime configuration schema for the redaction service.
//!
//! Every section is plain data. Values are populated from the environment by
//! [`crate::env`] and checked by [`crate::validation`].

use serde::{Deserialize, Serialize};

use crate::defaults;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactorConfig {
    /// HTTP listener settings
    pub server: ServerConfig,

    /// OCR backends (remote OCR.space and local Tesseract)
    pub ocr: OcrConfig,

    /// Optional Gemini text cleanup
    pub gemini: GeminiConfig,

    /// Request limits
    pub limits: LimitsConfig,

    /// Logging output
    pub logging: LoggingConfig,
}

// ---------------------------------------------------------------------------
// Server
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: defaults::DEFAULT_BIND_ADDRESS.to_string(),
            port: defaults::DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    /// `bind_address:port`, ready for `TcpListener::bind`.
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

// ---------------------------------------------------------------------------
// OCR
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrConfig {
    /// OCR.space API key. Remote OCR is skipped when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub api_url: String,
    /// OCR.space engine number (1, 2 or 3)
    pub engine: u8,
    pub timeout_secs: u64,
    /// Local Tesseract binary
    pub tesseract_cmd: String,
    /// Poppler rasteriser used to turn PDF pages into images
    pub pdftoppm_cmd: String,
    /// Rasterisation resolution for PDF pages
    pub dpi: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: defaults::DEFAULT_OCR_API_URL.to_string(),
            engine: defaults::DEFAULT_OCR_ENGINE,
            timeout_secs: defaults::DEFAULT_OCR_TIMEOUT_SECS,
            tesseract_cmd: defaults::DEFAULT_TESSERACT_CMD.to_string(),
            pdftoppm_cmd: defaults::DEFAULT_PDFTOPPM_CMD.to_string(),
            dpi: defaults::DEFAULT_OCR_DPI,
        }
    }
}

// ---------------------------------------------------------------------------
// Gemini
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: defaults::DEFAULT_GEMINI_MODEL.to_string(),
            api_base: defaults::DEFAULT_GEMINI_API_BASE.to_string(),
        }
    }
}

impl GeminiConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}

// ---------------------------------------------------------------------------
// Limits / logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LimitsConfig {
    pub max_upload_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: defaults::DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for rolling NDJSON logs; console only when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::DEFAULT_LOG_LEVEL.to_string(),
            dir: None,
        }
    }
}
