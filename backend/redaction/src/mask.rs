//! Masking passes.
//!
//! Both passes replace characters one for one with [`BLOCK`], so the output
//! keeps the input's character count and line structure.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde::Serialize;
use tracing::debug;

use crate::labels::all_labels;
use crate::patterns::{PatternKind, PATTERNS};

/// Full block, U+2588.
pub const BLOCK: char = '█';

/// Label, optional spaces, a separator (`:`, `-`, en dash), optional spaces,
/// then the rest of the line.
static LABEL_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    all_labels()
        .into_iter()
        .map(|label| {
            Regex::new(&format!(r"(?i)({}\s*[:\-–]\s*)([^\n\r]+)", regex::escape(label))).unwrap()
        })
        .collect()
});

/// Counts of what was masked. Never carries the masked values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionReport {
    pub label_hits: usize,
    pub pattern_hits: BTreeMap<PatternKind, usize>,
    pub masked_chars: usize,
}

impl RedactionReport {
    pub fn total_hits(&self) -> usize {
        self.label_hits + self.pattern_hits.values().sum::<usize>()
    }
}

/// Redacted text together with its report.
#[derive(Debug, Clone)]
pub struct Redaction {
    pub text: String,
    pub report: RedactionReport,
}

/// Replace every character of `s` with [`BLOCK`].
pub fn blackout(s: &str) -> String {
    std::iter::repeat_n(BLOCK, s.chars().count()).collect()
}

/// Mask the value after every PII label.
pub fn redact_labels(text: &str) -> String {
    let mut hits = 0;
    label_pass(text, &mut hits)
}

/// Mask every free-standing PII pattern.
pub fn redact_patterns(text: &str) -> String {
    let mut hits = BTreeMap::new();
    pattern_pass(text, &mut hits)
}

/// Labels first, then patterns.
pub fn redact_text(text: &str) -> String {
    redact_with_report(text).text
}

/// [`redact_text`] plus counts of what each pass masked.
pub fn redact_with_report(text: &str) -> Redaction {
    let mut report = RedactionReport::default();
    let labelled = label_pass(text, &mut report.label_hits);
    let redacted = pattern_pass(&labelled, &mut report.pattern_hits);

    let blocks = |s: &str| s.chars().filter(|c| *c == BLOCK).count();
    report.masked_chars = blocks(&redacted).saturating_sub(blocks(text));

    debug!(
        label_hits = report.label_hits,
        pattern_hits = report.total_hits() - report.label_hits,
        masked_chars = report.masked_chars,
        "Redaction complete"
    );

    Redaction {
        text: redacted,
        report,
    }
}

fn label_pass(text: &str, hits: &mut usize) -> String {
    let mut current = text.to_string();
    for re in LABEL_RES.iter() {
        let replaced = re.replace_all(&current, |caps: &Captures| {
            *hits += 1;
            format!("{}{}", &caps[1], blackout(&caps[2]))
        });
        current = replaced.into_owned();
    }
    current
}

fn pattern_pass(text: &str, hits: &mut BTreeMap<PatternKind, usize>) -> String {
    let mut current = text.to_string();
    for pattern in PATTERNS.iter() {
        let replaced = pattern.regex.replace_all(&current, |caps: &Captures| {
            *hits.entry(pattern.kind).or_default() += 1;
            blackout(&caps[0])
        });
        current = replaced.into_owned();
    }
    current
}
