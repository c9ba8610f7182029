//! Config redaction: produce safe-to-log config snapshots by masking secrets.

use serde_json::Value;

use crate::schema::RedactorConfig;

/// Keys whose string values are secrets.
static SECRET_KEYS: &[&str] = &["apiKey", "api_key", "apikey", "token", "secret", "password"];

/// Redact a config JSON value, replacing every secret with a short hint.
pub fn redact(value: &Value) -> Value {
    redact_recursive(value, "")
}

impl RedactorConfig {
    /// JSON snapshot of this config with secrets masked.
    pub fn redacted(&self) -> Value {
        redact(&serde_json::to_value(self).unwrap_or(Value::Null))
    }
}

fn is_secret_key(key: &str) -> bool {
    SECRET_KEYS.iter().any(|k| k.eq_ignore_ascii_case(key))
}

fn mask(s: &str) -> String {
    // Show the first 4 chars only when enough remain hidden.
    if s.chars().count() > 8 {
        format!("{}***", s.chars().take(4).collect::<String>())
    } else {
        "***".to_string()
    }
}

fn redact_recursive(value: &Value, key: &str) -> Value {
    match value {
        Value::String(s) if is_secret_key(key) && !s.is_empty() => Value::String(mask(s)),
        Value::Array(arr) => Value::Array(arr.iter().map(|v| redact_recursive(v, key)).collect()),
        Value::Object(map) => {
            let mut result = serde_json::Map::new();
            for (k, v) in map {
                result.insert(k.clone(), redact_recursive(v, k));
            }
            Value::Object(result)
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn masks_nested_api_keys() {
        let mut cfg = RedactorConfig::default();
        cfg.ocr.api_key = Some("K8545049088895".into());
        cfg.gemini.api_key = Some("short".into());
        let snapshot = cfg.redacted();
        assert_eq!(snapshot["ocr"]["apiKey"], "K854***");
        assert_eq!(snapshot["gemini"]["apiKey"], "***");
    }

    #[test]
    fn passthrough_non_sensitive() {
        let v = json!({ "logging": { "level": "debug" } });
        assert_eq!(redact(&v)["logging"]["level"], "debug");
    }

    #[test]
    fn absent_keys_are_not_serialized() {
        let snapshot = RedactorConfig::default().redacted();
        assert!(snapshot["ocr"].get("apiKey").is_none());
        assert_eq!(snapshot["server"]["port"], 8000);
    }
}
