//! HTTP server: shared state, routes and graceful shutdown.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use redactor_config::RedactorConfig;

use crate::health_api;
use crate::pipeline::DocumentPipeline;
use crate::process_api;

/// Room for multipart boundaries and the small form fields on top of the
/// file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

/// Application state shared across routes.
pub struct AppState {
    pub pipeline: DocumentPipeline,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn from_config(config: &RedactorConfig) -> Result<Self> {
        Ok(Self {
            pipeline: DocumentPipeline::from_config(config)?,
            max_upload_bytes: config.limits.max_upload_bytes,
        })
    }
}

/// Build the Axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);
    Router::new()
        .route("/health", get(health_api::health))
        .route("/process", post(process_api::process_document))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C or SIGTERM.
pub async fn start_server(addr: &str, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!(addr = %addr, "HTTP API listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Read};

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use redactor_extract::Extractor;

    use super::*;

    const BOUNDARY: &str = "redactor-test-boundary";

    enum Part<'a> {
        File(&'a str, &'a [u8]),
        Text(&'a str, &'a str),
    }

    fn multipart_body(parts: &[Part]) -> Vec<u8> {
        let mut body = Vec::new();
        for part in parts {
            body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
            match part {
                Part::File(filename, bytes) => {
                    body.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\n\
                             Content-Type: application/octet-stream\r\n\r\n"
                        )
                        .as_bytes(),
                    );
                    body.extend_from_slice(bytes);
                }
                Part::Text(name, value) => {
                    body.extend_from_slice(
                        format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}")
                            .as_bytes(),
                    );
                }
            }
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }

    fn app(max_upload_bytes: usize) -> Router {
        build_router(Arc::new(AppState {
            pipeline: DocumentPipeline::new(Extractor::new(Vec::new()), None),
            max_upload_bytes,
        }))
    }

    async fn post_process(app: Router, parts: &[Part<'_>]) -> axum::response::Response {
        let request = Request::post("/process")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(parts)))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn detail(response: axum::response::Response) -> String {
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        json["detail"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = app(1024)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn process_returns_zip_download() {
        let response = post_process(
            app(1024),
            &[
                Part::File("patient.txt", b"SSN: 123-45-6789\nemail jane@example.com"),
                Part::Text("use_ai", "false"),
                Part::Text("language", "eng"),
            ],
        )
        .await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/zip");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"patient_cleaned_redacted.zip\""
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let mut archive = zip::ZipArchive::new(Cursor::new(body.to_vec())).unwrap();
        assert_eq!(archive.len(), 2);

        let mut pdf = Vec::new();
        archive
            .by_name("patient_cleaned_redacted.pdf")
            .unwrap()
            .read_to_end(&mut pdf)
            .unwrap();
        let pdf = String::from_utf8_lossy(&pdf);
        assert!(!pdf.contains("123-45-6789"));
        assert!(!pdf.contains("jane@example.com"));
        assert!(pdf.starts_with("%PDF-"));
    }

    #[tokio::test]
    async fn non_ascii_upload_name_is_header_safe() {
        let response = post_process(app(1024), &[Part::File("résumé.txt", b"Call 555-123-4567")]).await;

        assert_eq!(response.status(), StatusCode::OK);
        let disposition = &response.headers()[header::CONTENT_DISPOSITION];
        assert!(disposition.as_bytes().is_ascii());
        assert_eq!(
            disposition,
            "attachment; filename=\"r_sum__cleaned_redacted.zip\"; \
             filename*=UTF-8''r%C3%A9sum%C3%A9_cleaned_redacted.zip"
        );
    }

    #[tokio::test]
    async fn empty_file_is_bad_request() {
        let response = post_process(app(1024), &[Part::File("empty.txt", b"")]).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(detail(response).await, "Empty file");
    }

    #[tokio::test]
    async fn unreadable_file_is_unprocessable() {
        let response = post_process(app(1024), &[Part::File("scan.png", b"\x89PNG\r\n\x1a\n")]).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(response).await, "Failed to extract text from file.");
    }

    #[tokio::test]
    async fn missing_file_field_is_unprocessable() {
        let response = post_process(app(1024), &[Part::Text("use_ai", "true")]).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(response).await, "Missing file field");
    }

    #[tokio::test]
    async fn bad_form_values_are_unprocessable() {
        let response = post_process(
            app(1024),
            &[Part::File("a.txt", b"hi"), Part::Text("use_ai", "maybe")],
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = post_process(
            app(1024),
            &[Part::File("a.txt", b"hi"), Part::Text("language", "eng;rm")],
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(detail(response).await, "Invalid language code: eng;rm");
    }

    #[tokio::test]
    async fn oversized_upload_is_rejected() {
        let big = vec![b'a'; 100];
        let response = post_process(app(16), &[Part::File("big.txt", &big)]).await;
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn non_multipart_body_is_unprocessable() {
        let request = Request::post("/process")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{}"))
            .unwrap();
        let response = app(1024).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
