//! Text normalization passes.
//!
//! Applied to text nodes during the walk ([`collapse_whitespace`]) and to the
//! assembled document afterwards ([`normalize`], [`repair_footnote_definitions`]).
//! The document passes are idempotent.

use once_cell::sync::Lazy;
use regex::Regex;

static BLANK_LINE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

// A definition line whose label is followed by whitespace instead of a colon.
static UNTERMINATED_DEFINITION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^(\[\^[^\]]+\])[ \t]+([^\s:])").unwrap());

fn is_space(c: char) -> bool {
    c.is_whitespace() || c == '\u{feff}'
}

/// Collapse every run of whitespace (including non-breaking spaces) to one space.
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for c in text.chars() {
        if is_space(c) {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

/// Remove trailing whitespace from every line.
pub fn strip_trailing_whitespace(text: &str) -> String {
    text.split('\n')
        .map(|line| line.trim_end_matches(is_space))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Reduce runs of three or more newlines to a single blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUN.replace_all(text, "\n\n").into_owned()
}

/// Strip trailing whitespace, then collapse blank-line runs.
pub fn normalize(text: &str) -> String {
    collapse_blank_lines(&strip_trailing_whitespace(text))
}

/// Rewrite `[^label] text` at line start into `[^label]: text`.
pub fn repair_footnote_definitions(text: &str) -> String {
    UNTERMINATED_DEFINITION
        .replace_all(text, "$1: $2")
        .into_owned()
}
