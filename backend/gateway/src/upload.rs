//! Multipart form parsing for `POST /process`.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;
use tracing::debug;

use redactor_config::DEFAULT_LANGUAGE;

use crate::error::ApiError;

/// Fields of one upload.
#[derive(Debug)]
pub struct UploadForm {
    pub filename: String,
    pub bytes: Bytes,
    pub use_ai: bool,
    pub language: String,
}

/// Form booleans as browsers and HTTP clients usually send them. Blank means
/// unset.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" | "t" | "y" => Some(true),
        "false" | "0" | "no" | "off" | "f" | "n" | "" => Some(false),
        _ => None,
    }
}

/// Read `file`, `use_ai` and `language` from the form. Unknown fields are
/// skipped. A file larger than `max_bytes` is rejected with 413.
pub async fn read_upload(mut multipart: Multipart, max_bytes: usize) -> Result<UploadForm, ApiError> {
    let mut file: Option<(String, Bytes)> = None;
    let mut use_ai = false;
    let mut language: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(ApiError::from_multipart)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(ApiError::from_multipart)?;
                if bytes.len() > max_bytes {
                    return Err(ApiError::PayloadTooLarge { limit: max_bytes });
                }
                debug!(filename = %filename, bytes = bytes.len(), "Received upload");
                file = Some((filename, bytes));
            }
            Some("use_ai") => {
                let raw = field.text().await.map_err(ApiError::from_multipart)?;
                use_ai = parse_bool(&raw).ok_or_else(|| ApiError::BadForm {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: format!("Invalid boolean for use_ai: {}", raw.trim()),
                })?;
            }
            Some("language") => {
                let raw = field.text().await.map_err(ApiError::from_multipart)?;
                let raw = raw.trim();
                if !raw.is_empty() {
                    language = Some(raw.to_string());
                }
            }
            other => debug!(field = ?other, "Ignoring unknown form field"),
        }
    }

    let (filename, bytes) = file.ok_or(ApiError::MissingFile)?;
    Ok(UploadForm {
        filename,
        bytes,
        use_ai,
        language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
    })
}
