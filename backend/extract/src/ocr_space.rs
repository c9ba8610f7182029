//! OCR.space remote OCR.
//!
//! Uploads the document as multipart form data and joins the text of every
//! parsed page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{debug, info};

use redactor_config::OcrConfig;

use crate::error::{ExtractError, Result};
use crate::file_kind::FileKind;
use crate::ocr::OcrBackend;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct OcrSpaceResponse {
    #[serde(default)]
    parsed_results: Option<Vec<ParsedResult>>,
    #[serde(default)]
    is_errored_on_processing: bool,
    #[serde(default)]
    error_message: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ParsedResult {
    #[serde(default)]
    parsed_text: String,
}

pub struct OcrSpaceClient {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    engine: u8,
    timeout: Duration,
}

impl OcrSpaceClient {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>, config: &OcrConfig) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            api_key: api_key.into(),
            engine: config.engine,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }

    /// Client for the configured endpoint, or `None` without an API key.
    pub fn from_config(client: reqwest::Client, config: &OcrConfig) -> Option<Self> {
        config
            .api_key
            .as_deref()
            .map(|key| Self::new(client, key, config))
    }
}

#[async_trait]
impl OcrBackend for OcrSpaceClient {
    fn name(&self) -> &'static str {
        "ocr.space"
    }

    async fn recognize(
        &self,
        bytes: &[u8],
        filename: &str,
        _kind: FileKind,
        language: &str,
    ) -> Result<String> {
        info!(bytes = bytes.len(), language, "[OCR.space] Uploading document");

        let part = Part::bytes(bytes.to_vec()).file_name(filename.to_string());
        let form = Form::new()
            .part("file", part)
            .text("apikey", self.api_key.clone())
            .text("language", language.to_string())
            .text("OCREngine", self.engine.to_string());

        let resp = self
            .client
            .post(&self.api_url)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;
        let body: OcrSpaceResponse = resp.json().await?;

        if body.is_errored_on_processing {
            let message = body
                .error_message
                .map(|m| match m {
                    serde_json::Value::String(s) => s,
                    other => other.to_string(),
                })
                .unwrap_or_else(|| "processing failed".to_string());
            return Err(ExtractError::OcrSpace(message));
        }

        let pages = body.parsed_results.unwrap_or_default();
        debug!(pages = pages.len(), "[OCR.space] Parsed results received");
        Ok(pages
            .into_iter()
            .map(|p| p.parsed_text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use axum::{routing::post, Json, Router};
    use serde_json::json;
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(reply: serde_json::Value) -> String {
        let app = Router::new().route(
            "/parse/image",
            post(move || {
                let reply = reply.clone();
                async move { Json(reply) }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/parse/image")
    }

    fn client_for(url: String) -> OcrSpaceClient {
        let config = OcrConfig {
            api_url: url,
            ..OcrConfig::default()
        };
        OcrSpaceClient::new(reqwest::Client::new(), "test-key", &config)
    }

    #[test]
    fn disabled_without_key() {
        assert!(OcrSpaceClient::from_config(reqwest::Client::new(), &OcrConfig::default()).is_none());
    }

    #[tokio::test]
    async fn joins_parsed_pages() {
        let url = serve(json!({
            "ParsedResults": [{ "ParsedText": "page one" }, { "ParsedText": "page two" }],
            "IsErroredOnProcessing": false
        }))
        .await;
        let text = client_for(url)
            .recognize(b"%PDF-1.4", "scan.pdf", FileKind::Pdf, "eng")
            .await
            .unwrap();
        assert_eq!(text, "page one\npage two");
    }

    #[tokio::test]
    async fn surfaces_processing_errors() {
        let url = serve(json!({
            "IsErroredOnProcessing": true,
            "ErrorMessage": ["File failed validation"]
        }))
        .await;
        let err = client_for(url)
            .recognize(b"x", "scan.png", FileKind::Image, "eng")
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::OcrSpace(ref m) if m.contains("File failed validation")));
    }
}
