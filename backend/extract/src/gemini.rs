//! OCR text cleanup through the Gemini `generateContent` API.
//!
//! Cleanup is best effort: [`GeminiCleaner::clean_or_keep`] falls back to the
//! input text on any failure.

use std::time::Duration;

use tracing::{info, warn};

use redactor_config::GeminiConfig;

use crate::error::{ExtractError, Result};

const CLEANUP_PROMPT: &str = "Clean OCR text:
- fix OCR mistakes
- remove random breaks
- preserve formatting
Return ONLY cleaned text.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GeminiCleaner {
    client: reqwest::Client,
    api_key: String,
    model: String,
    api_base: String,
}

impl GeminiCleaner {
    pub fn new(
        client: reqwest::Client,
        api_key: impl Into<String>,
        model: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            api_base: api_base.into(),
        }
    }

    /// Cleaner for the configured model, or `None` without an API key.
    pub fn from_config(client: reqwest::Client, config: &GeminiConfig) -> Option<Self> {
        config
            .api_key
            .as_deref()
            .map(|key| Self::new(client, key, &config.model, &config.api_base))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Ask the model to clean `text`; the trimmed reply must be non-empty.
    pub async fn clean(&self, text: &str) -> Result<String> {
        info!("[Gemini] Cleaning {} chars via {}", text.chars().count(), self.model);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base, self.model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [
                { "text": format!("{CLEANUP_PROMPT}\n\n{text}") }
            ]}]
        });

        let resp = self
            .client
            .post(&url)
            .json(&body)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(hide_url)?;
        if !resp.status().is_success() {
            let status = resp.status();
            return Err(ExtractError::Gemini(format!(
                "{status}: {}",
                resp.text().await.unwrap_or_default()
            )));
        }

        let json: serde_json::Value = resp.json().await.map_err(hide_url)?;
        let cleaned = json["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<String>()
            })
            .unwrap_or_default();

        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Err(ExtractError::Gemini("empty response".into()));
        }
        Ok(cleaned.to_string())
    }

    /// [`clean`](Self::clean), keeping the original text when cleanup fails.
    pub async fn clean_or_keep(&self, text: String) -> String {
        match self.clean(&text).await {
            Ok(cleaned) => cleaned,
            Err(e) => {
                warn!(error = %e, "[Gemini] Cleanup failed, keeping extracted text");
                text
            }
        }
    }
}

/// The request URL carries the API key; keep it out of error messages.
fn hide_url(e: reqwest::Error) -> ExtractError {
    ExtractError::Http(e.without_url())
}

#[cfg(test)]
mod tests {
    use axum::{routing::post, Json, Router};
    use serde_json::{json, Value};
    use tokio::net::TcpListener;

    use super::*;

    async fn serve(reply: Value) -> String {
        let app = Router::new().route(
            "/v1beta/models/{action}",
            post(move |Json(req): Json<Value>| {
                let reply = reply.clone();
                async move {
                    let prompt = req["contents"][0]["parts"][0]["text"].as_str().unwrap_or("");
                    assert!(prompt.starts_with("Clean OCR text:"));
                    Json(reply)
                }
            }),
        );
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/v1beta")
    }

    #[test]
    fn disabled_without_key() {
        assert!(GeminiCleaner::from_config(reqwest::Client::new(), &GeminiConfig::default()).is_none());
    }

    #[tokio::test]
    async fn returns_trimmed_candidate_text() {
        let base = serve(json!({
            "candidates": [{ "content": { "parts": [{ "text": "  Hello world \n" }] } }]
        }))
        .await;
        let cleaner = GeminiCleaner::new(reqwest::Client::new(), "k", "gemini-test", base);
        assert_eq!(cleaner.clean("He11o wor1d").await.unwrap(), "Hello world");
    }

    #[tokio::test]
    async fn keeps_original_on_empty_reply() {
        let base = serve(json!({ "candidates": [] })).await;
        let cleaner = GeminiCleaner::new(reqwest::Client::new(), "k", "gemini-test", base);
        assert_eq!(cleaner.clean_or_keep("raw text".into()).await, "raw text");
    }

    #[tokio::test]
    async fn keeps_original_when_unreachable() {
        let cleaner = GeminiCleaner::new(
            reqwest::Client::new(),
            "k",
            "gemini-test",
            "http://127.0.0.1:9/v1beta",
        );
        assert_eq!(cleaner.clean_or_keep("raw text".into()).await, "raw text");
    }
}
