//! Format-string literal extraction from matched statements.

use regex::Regex;
use std::sync::OnceLock;

fn quoted() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // A quote, then runs of non-quote-non-backslash or
        // backslash-plus-anything, then the closing quote.
        Regex::new(r#""((?:[^"\\]|\\.)*)""#).expect("literal pattern")
    })
}

/// First top-level double-quoted literal in a statement, escapes intact.
///
/// Returns `None` when the captured statement window shows no string
/// argument at all (the call may pass a variable or a macro instead).
pub fn extract_literal(statement: &str) -> Option<String> {
    quoted()
        .captures(statement)
        .map(|captures| captures[1].to_string())
}

/// Drop source-level escapes that carry no content in the rendered line.
///
/// A literal `\n` disappears at the end of a log line and `\"` renders as
/// a plain quote.
pub fn tidy(text: &str) -> String {
    text.replace("\\n", "").replace("\\\"", "\"")
}

/// Literals too generic to be useful as match patterns: empty, a single
/// character, or a bare `%s` that would match anything.
pub fn is_noise(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed == "%s" || trimmed.chars().count() <= 1
}
