//! Default values applied when an environment variable is unset or empty.

/// Listen on every interface, as the container expects.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0";

/// Default HTTP port (`PORT`).
pub const DEFAULT_PORT: u16 = 8000;

pub const DEFAULT_OCR_API_URL: &str = "https://api.ocr.space/parse/image";

pub const DEFAULT_OCR_ENGINE: u8 = 2;

/// Timeout for a single remote OCR call or local OCR subprocess.
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 120;

pub const DEFAULT_TESSERACT_CMD: &str = "tesseract";

pub const DEFAULT_PDFTOPPM_CMD: &str = "pdftoppm";

/// Resolution used when rasterising PDF pages for OCR.
pub const DEFAULT_OCR_DPI: u32 = 200;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-pro-latest";

pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// 25 MiB
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub const DEFAULT_LOG_LEVEL: &str = "info";

/// OCR language when the caller does not pick one.
pub const DEFAULT_LANGUAGE: &str = "eng";
