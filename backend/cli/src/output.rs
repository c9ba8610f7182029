//! Terminal output helpers: ANSI notes and aligned key/value summaries.

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

/// Strip ANSI escape codes from a string.
pub fn strip_ansi(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            for next in chars.by_ref() {
                if next == 'm' {
                    break;
                }
            }
        } else {
            result.push(c);
        }
    }
    result
}

pub fn note_info(msg: &str) {
    if supports_color() {
        println!("{CYAN}{BOLD}ℹ{RESET} {msg}");
    } else {
        println!("INFO: {msg}");
    }
}

pub fn note_warn(msg: &str) {
    if supports_color() {
        println!("{YELLOW}{BOLD}⚠{RESET} {msg}");
    } else {
        println!("WARN: {msg}");
    }
}

pub fn note_error(msg: &str) {
    if supports_color() {
        eprintln!("{RED}{BOLD}✗{RESET} {msg}");
    } else {
        eprintln!("ERROR: {msg}");
    }
}

pub fn note_success(msg: &str) {
    if supports_color() {
        println!("{GREEN}{BOLD}✓{RESET} {msg}");
    } else {
        println!("OK: {msg}");
    }
}

/// Two aligned columns, keys dimmed when color is on.
pub fn render_summary(rows: &[(String, String)], color: bool) -> String {
    let width = rows
        .iter()
        .map(|(k, _)| strip_ansi(k).chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, value) in rows {
        let pad = " ".repeat(width - strip_ansi(key).chars().count());
        if color {
            out.push_str(&format!("  {DIM}{key}{RESET}{pad}  {value}\n"));
        } else {
            out.push_str(&format!("  {key}{pad}  {value}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_ansi() {
        let colored = format!("{GREEN}hello{RESET}");
        assert_eq!(strip_ansi(&colored), "hello");
    }

    #[test]
    fn aligns_summary_columns() {
        let rows = vec![
            ("Kind".to_string(), "text".to_string()),
            ("Masked chars".to_string(), "11".to_string()),
        ];
        let out = render_summary(&rows, false);
        assert_eq!(out, "  Kind          text\n  Masked chars  11\n");
    }
}
