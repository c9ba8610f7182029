//! PII redaction for extracted document text.
//!
//! Two passes run in order:
//! 1. labelled values: the rest of a line after a known field label
//!    ("SSN: ...", "Policy No - ...") is masked;
//! 2. free-standing values: SSNs, card numbers, phone numbers, e-mail
//!    addresses and MM/DD/YYYY dates are masked wherever they appear.

pub mod labels;
pub mod mask;
pub mod patterns;

pub use labels::{all_labels, LabelCategory, PII_LABELS};
pub use mask::{
    blackout, redact_labels, redact_patterns, redact_text, redact_with_report, Redaction,
    RedactionReport, BLOCK,
};
pub use patterns::{PatternKind, PATTERNS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_with_pattern_names() {
        let r = redact_with_report("a@b.co and 123-45-6789");
        let v = serde_json::to_value(&r.report).unwrap();
        assert_eq!(v["patternHits"]["Ssn"], 1);
        assert_eq!(v["patternHits"]["Email"], 1);
        assert_eq!(v["labelHits"], 0);
    }
}
