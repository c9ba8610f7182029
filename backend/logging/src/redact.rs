//! Log Redaction Layer
//!
//! Scrubs API keys and access tokens from strings prior to logging. Upstream
//! HTTP errors echo request URLs, and the Gemini URL carries its key as a
//! query parameter.

use regex::Regex;
use std::sync::LazyLock;

static QUERY_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)([?&](?:key|apikey|api_key)=)[^&\s]+").unwrap());
static GOOGLE_KEY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AIza[0-9A-Za-z_\-]{30,}").unwrap());
static BEARER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Bearer\s+[a-zA-Z0-9\-\._~+/]+=*").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    let redacted = QUERY_KEY_RE.replace_all(input, "${1}[REDACTED]");
    let redacted = GOOGLE_KEY_RE.replace_all(&redacted, "[REDACTED_TOKEN]");
    BEARER_RE.replace_all(&redacted, "[REDACTED_TOKEN]").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scrubs_query_key() {
        let raw = "error sending request for url (https://example.com/v1beta/models/m:generateContent?key=abc123&alt=json)";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("abc123"));
        assert!(clean.contains("?key=[REDACTED]&alt=json"));
    }

    #[test]
    fn scrubs_bearer_and_google_keys() {
        let raw = "Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9 AIzaSyA0123456789abcdefghijklmnopqrstu";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("eyJhbGci"));
        assert!(!clean.contains("AIzaSy"));
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(redact_sensitive_data("tesseract exited with 1"), "tesseract exited with 1");
    }
}
