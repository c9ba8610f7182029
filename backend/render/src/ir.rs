//! Document model shared by the DOCX and PDF writers.

use serde::Serialize;

/// Heading written at the top of the DOCX output.
pub const DOCUMENT_TITLE: &str = "Cleaned & Redacted Document";

/// Redacted text broken into output paragraphs, one per source line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedactedDocument {
    pub title: String,
    pub paragraphs: Vec<String>,
}

impl RedactedDocument {
    pub fn from_text(text: &str) -> Self {
        Self {
            title: DOCUMENT_TITLE.to_string(),
            paragraphs: split_lines(text).into_iter().map(str::to_string).collect(),
        }
    }
}

/// Split on every line boundary (`\n`, `\r\n`, `\r`, vertical tab, form
/// feed, file/group/record separators, NEL, U+2028, U+2029). A trailing
/// boundary does not start an extra empty line.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let is_break = matches!(
            c,
            '\n' | '\r' | '\x0b' | '\x0c' | '\x1c' | '\x1d' | '\x1e' | '\u{85}' | '\u{2028}' | '\u{2029}'
        );
        if !is_break {
            continue;
        }
        lines.push(&text[start..i]);
        let mut end = i + c.len_utf8();
        if c == '\r' {
            if let Some((j, '\n')) = chars.peek().copied() {
                chars.next();
                end = j + 1;
            }
        }
        start = end;
    }

    if start < text.len() {
        lines.push(&text[start..]);
    }
    lines
}
