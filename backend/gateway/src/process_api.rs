//! `POST /process`: upload a document, download the redacted ZIP.

use std::sync::Arc;

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderValue};
use axum::response::{IntoResponse, Response};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use tracing::{error, info};

use redactor_logging::{EventLogger, ProcessingEvent};
use redactor_render::RedactedBundle;

use crate::error::ApiError;
use crate::server::AppState;
use crate::upload::read_upload;

/// RFC 5987 `attr-char`: everything else in `filename*` is percent-encoded.
const ATTR_CHAR: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'!')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'^')
    .remove(b'_')
    .remove(b'`')
    .remove(b'|')
    .remove(b'~');

/// Handler for `POST /process`.
pub async fn process_document(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError> {
    let multipart = multipart.map_err(ApiError::from_rejection)?;
    let upload = read_upload(multipart, state.max_upload_bytes)
        .await
        .inspect_err(|e| log_failure("", e))?;

    info!(
        filename = %upload.filename,
        bytes = upload.bytes.len(),
        use_ai = upload.use_ai,
        language = %upload.language,
        "Processing upload"
    );

    let doc = state
        .pipeline
        .process(&upload.bytes, &upload.filename, upload.use_ai, &upload.language)
        .await
        .map_err(ApiError::from)
        .inspect_err(|e| log_failure(&upload.filename, e))?;

    EventLogger::log_event(
        &upload.filename,
        ProcessingEvent::Completed {
            file_kind: doc.kind.map(|k| k.as_str()).unwrap_or("unknown").to_string(),
            text_chars: doc.text_chars,
            masked_chars: doc.report.masked_chars,
            used_ai: doc.used_ai,
            archive_bytes: doc.bundle.bytes.len(),
            elapsed_ms: doc.elapsed.as_millis(),
        },
    );

    Ok(zip_response(doc.bundle))
}

fn zip_response(bundle: RedactedBundle) -> Response {
    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/zip")),
            (header::CONTENT_DISPOSITION, content_disposition(&bundle.archive_name)),
        ],
        bundle.bytes,
    )
        .into_response()
}

/// `attachment` header for `filename`. Non-ASCII names get an ASCII
/// `filename=` fallback plus the exact name as `filename*=UTF-8''...`.
pub(crate) fn content_disposition(filename: &str) -> HeaderValue {
    let fallback: String = filename
        .chars()
        .map(|c| match c {
            ' '..='~' if c != '"' && c != '\\' => c,
            _ => '_',
        })
        .collect();

    let value = if fallback == filename {
        format!("attachment; filename=\"{fallback}\"")
    } else {
        format!(
            "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
            utf8_percent_encode(filename, ATTR_CHAR)
        )
    };
    HeaderValue::from_str(&value).unwrap_or_else(|_| HeaderValue::from_static("attachment"))
}

fn log_failure(filename: &str, e: &ApiError) {
    let status = e.status();
    if status.is_server_error() {
        error!(filename, error = %e, "Document processing failed");
        EventLogger::log_event(
            filename,
            ProcessingEvent::Failed {
                error_msg: e.to_string(),
            },
        );
    } else {
        EventLogger::log_event(
            filename,
            ProcessingEvent::Rejected {
                status: status.as_u16(),
                reason: e.detail(),
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_names_use_plain_filename() {
        assert_eq!(
            content_disposition("scan_cleaned_redacted.zip"),
            "attachment; filename=\"scan_cleaned_redacted.zip\""
        );
    }

    #[test]
    fn non_ascii_names_are_encoded() {
        assert_eq!(
            content_disposition("résumé_cleaned_redacted.zip"),
            "attachment; filename=\"r_sum__cleaned_redacted.zip\"; \
             filename*=UTF-8''r%C3%A9sum%C3%A9_cleaned_redacted.zip"
        );
        assert_eq!(
            content_disposition("报告 1.zip"),
            "attachment; filename=\"__ 1.zip\"; filename*=UTF-8''%E6%8A%A5%E5%91%8A%201.zip"
        );
    }
}
