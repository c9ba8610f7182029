//! Processing Event Logger
//!
//! One structured event per processed document, written through `tracing` so
//! it lands in the NDJSON file next to ordinary logs. Events carry counts and
//! timings only, never document text.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::redact::redact_sensitive_data;

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProcessingEvent {
    Completed {
        file_kind: String,
        text_chars: usize,
        masked_chars: usize,
        used_ai: bool,
        archive_bytes: usize,
        elapsed_ms: u128,
    },
    Rejected {
        status: u16,
        reason: String,
    },
    Failed {
        error_msg: String,
    },
}

#[derive(Debug, Serialize)]
pub struct EventLogEntry {
    pub filename: String,
    pub timestamp: DateTime<Utc>,
    pub event: ProcessingEvent,
}

pub struct EventLogger;

impl EventLogger {
    /// Logs the outcome of one document, scrubbing error text before it is emitted.
    pub fn log_event(filename: &str, mut event: ProcessingEvent) {
        if let ProcessingEvent::Failed { error_msg } = &mut event {
            *error_msg = redact_sensitive_data(error_msg);
        }

        let failed = matches!(event, ProcessingEvent::Failed { .. });
        let entry = EventLogEntry {
            filename: filename.into(),
            timestamp: Utc::now(),
            event,
        };
        let json = serde_json::to_string(&entry).unwrap_or_default();

        if failed {
            warn!(target: "redactor_events", event = %json, "Document processing event");
        } else {
            info!(target: "redactor_events", event = %json, "Document processing event");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_tagged_event() {
        let entry = EventLogEntry {
            filename: "scan.pdf".into(),
            timestamp: Utc::now(),
            event: ProcessingEvent::Rejected {
                status: 422,
                reason: "Failed to extract text from file.".into(),
            },
        };
        let v = serde_json::to_value(&entry).unwrap();
        assert_eq!(v["event"]["type"], "rejected");
        assert_eq!(v["event"]["status"], 422);
        assert_eq!(v["filename"], "scan.pdf");
    }

    #[test]
    fn logging_a_failure_does_not_panic() {
        EventLogger::log_event(
            "a.png",
            ProcessingEvent::Failed {
                error_msg: "POST https://x/y?key=secret failed".into(),
            },
        );
    }
}
