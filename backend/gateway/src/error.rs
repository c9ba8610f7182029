//! API error type and its JSON `{"detail": ...}` rendering.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;
use thiserror::Error;

use crate::pipeline::PipelineError;

/// Message returned for every unexpected failure. Details go to the log only.
pub const INTERNAL_DETAIL: &str = "Server error during processing";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Missing file field")]
    MissingFile,

    #[error("File exceeds the upload limit of {limit} bytes")]
    PayloadTooLarge { limit: usize },

    #[error("{message}")]
    BadForm { status: StatusCode, message: String },

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFile => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::BadForm { status, .. } => *status,
            ApiError::Pipeline(e) => match e {
                PipelineError::EmptyFile => StatusCode::BAD_REQUEST,
                PipelineError::InvalidLanguage(_) | PipelineError::NoText => {
                    StatusCode::UNPROCESSABLE_ENTITY
                }
                PipelineError::Render(_) | PipelineError::Task(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    /// Client-facing message. Server errors never expose their cause.
    pub fn detail(&self) -> String {
        if self.status().is_server_error() {
            INTERNAL_DETAIL.to_string()
        } else {
            self.to_string()
        }
    }

    pub fn from_multipart(e: MultipartError) -> Self {
        ApiError::BadForm {
            status: e.status(),
            message: e.body_text(),
        }
    }

    /// Requests that are not `multipart/form-data` at all.
    pub fn from_rejection(e: MultipartRejection) -> Self {
        ApiError::BadForm {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: e.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "detail": self.detail() }))).into_response()
    }
}
