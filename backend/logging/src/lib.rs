//! Telemetry and structured logging for the redaction service.
//!
//! Handles log scrubbing, JSON file output, and per-document processing events.

pub mod event_logger;
pub mod logger;
pub mod redact;

pub use event_logger::{EventLogEntry, EventLogger, ProcessingEvent};
pub use logger::init_logger;
pub use redact::redact_sensitive_data;
