//! Free-standing PII shapes that are masked wherever they appear.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Kinds of value matched without a preceding label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PatternKind {
    Ssn,
    CreditCard,
    Phone,
    Email,
    DateMmDdYyyy,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternKind::Ssn => "SSN",
            PatternKind::CreditCard => "CreditCard",
            PatternKind::Phone => "Phone",
            PatternKind::Email => "Email",
            PatternKind::DateMmDdYyyy => "DateMMDDYYYY",
        }
    }
}

pub struct PiiPattern {
    pub kind: PatternKind,
    pub regex: Regex,
}

fn compile(kind: PatternKind, pattern: &str) -> PiiPattern {
    PiiPattern {
        kind,
        regex: Regex::new(&format!("(?i){pattern}")).unwrap(),
    }
}

/// Patterns in application order. Card numbers run before phone numbers so a
/// 16-digit card is masked whole instead of losing only its first 12 digits to
/// the phone shape.
pub static PATTERNS: Lazy<Vec<PiiPattern>> = Lazy::new(|| {
    vec![
        compile(PatternKind::Ssn, r"\b\d{3}-\d{2}-\d{4}\b"),
        compile(PatternKind::CreditCard, r"\b(?:\d{4}[-\s]?){3}\d{4}\b"),
        compile(
            PatternKind::Phone,
            r"\b\+?\d{1,3}?[-.\s]?\(?\d{2,4}\)?[-.\s]?\d{3,4}[-.\s]?\d{3,4}\b",
        ),
        compile(PatternKind::Email, r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"),
        compile(
            PatternKind::DateMmDdYyyy,
            r"\b(?:0?[1-9]|1[0-2])[/\-.](?:0?[1-9]|[12]\d|3[01])[/\-.]\d{4}\b",
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(kind: PatternKind) -> &'static Regex {
        &PATTERNS.iter().find(|p| p.kind == kind).unwrap().regex
    }

    #[test]
    fn ssn_shape() {
        assert!(pattern(PatternKind::Ssn).is_match("ssn 123-45-6789"));
        assert!(!pattern(PatternKind::Ssn).is_match("123-456-789"));
    }

    #[test]
    fn email_shape() {
        let m = pattern(PatternKind::Email).find("write to Jane.Doe@Example.org today").unwrap();
        assert_eq!(m.as_str(), "Jane.Doe@Example.org");
    }

    #[test]
    fn date_shape() {
        assert!(pattern(PatternKind::DateMmDdYyyy).is_match("12/31/2020"));
        assert!(pattern(PatternKind::DateMmDdYyyy).is_match("1-5-1999"));
        assert!(!pattern(PatternKind::DateMmDdYyyy).is_match("13/01/2020"));
    }

    #[test]
    fn card_shape() {
        let m = pattern(PatternKind::CreditCard).find("card 4111-1111-1111-1111 ok").unwrap();
        assert_eq!(m.as_str(), "4111-1111-1111-1111");
    }
}
