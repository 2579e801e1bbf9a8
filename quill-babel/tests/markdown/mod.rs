//! Markdown format tests
//!
//! Tests for source tree → Markdown conversion.

mod export;
mod lists;
mod table;

/// Convert editor HTML with default options.
pub fn to_markdown(html: &str) -> String {
    quill_babel::html_to_markdown(html).expect("conversion should succeed")
}
