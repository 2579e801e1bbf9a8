//! Editor HTML to Markdown conversion
//!
//!     This crate turns the HTML content model of a rich-text editor into canonical Markdown:
//!     headings, emphasis, bullet/ordered/task lists, tables, fenced code, links, images and
//!     footnotes gathered from the several HTML footnote conventions found in the wild
//!     (word-processor exports, markdown-it output, bare superscript markers).
//!
//!     This is a pure lib, that is, it powers quill-cli but is shell agnostic: no code here
//!     should suppose a shell environment, be it std printing, env vars etc. Diagnostics go
//!     through the `log` facade and the host decides where they end up.
//!
//! Architecture
//!
//!     Conversion is two steps with an owned tree in the middle:
//!
//!         HTML ──html5ever──▶ dom::Document ──MarkdownSerializer──▶ Markdown
//!
//!     The HTML side only parses and copies the `<body>` into [`dom`]; all Markdown
//!     decisions, including footnote recognition, happen in the serializer walking that tree.
//!
//!     The file structure :
//!     .
//!     ├── error.rs
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── dom                     # Owned source tree and queries over it
//!     ├── formats
//!     │   ├── html                # html5ever front end (parse only)
//!     │   ├── markdown            # Serializer, footnotes, lists, tables, normalization
//!     │   ├── treeviz             # Debug dump of the parsed tree
//!     │   └── icons.rs
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── lib.rs                  # includes the subdirectories below
//!     ├── common
//!     ├── html
//!     └── markdown
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Core Algorithms
//!
//!     The serializer is one recursive walk. Every call receives an immutable
//!     [`formats::markdown::SerializationContext`] (inline or block mode, list depth, whether
//!     footnote capture is suppressed) and the single mutable
//!     [`formats::markdown::SerializerState`] of the conversion, which accumulates footnote
//!     definitions. After the walk the body and the definitions are joined and run through
//!     the normalization passes, so that output never has trailing whitespace, never more
//!     than one blank line in a row, and always ends in exactly one newline.
//!
//! Formats
//!
//!     Format specific capabilities are implemented with the Format trait, see [`format::Format`]:
//!     - `html`: parse only
//!     - `markdown`: serialize only
//!     - `treeviz`: serialize only, for inspecting what the parser produced

pub mod dom;
pub mod error;
pub mod format;
pub mod formats;
pub mod registry;

pub use dom::Document;
pub use error::FormatError;
pub use format::Format;
pub use formats::markdown::{Conversion, MarkdownOptions, MarkdownSerializer};
pub use registry::FormatRegistry;

/// Convert editor HTML to Markdown with default options.
///
/// # Examples
///
/// ```ignore
/// let markdown = quill_babel::html_to_markdown("<h2>Notes</h2><p>Hello</p>")?;
/// assert_eq!(markdown, "## Notes\n\nHello\n");
/// ```
pub fn html_to_markdown(html: &str) -> Result<String, FormatError> {
    html_to_markdown_with_options(html, &MarkdownOptions::default())
}

/// Convert editor HTML to Markdown.
///
/// Strict: any recoverable problem, such as nesting deeper than
/// `options.max_depth`, is returned as the error and the partial Markdown is
/// discarded. Use [`convert_html`] to keep it.
pub fn html_to_markdown_with_options(
    html: &str,
    options: &MarkdownOptions,
) -> Result<String, FormatError> {
    let doc = formats::html::parse_from_html(html)?;
    MarkdownSerializer::new(*options).serialize(&doc)
}

/// Best-effort conversion: the Markdown for everything that could be converted,
/// plus the problems met on the way.
///
/// Only a failure to parse the HTML at all is returned as `Err`.
pub fn convert_html(html: &str, options: &MarkdownOptions) -> Result<Conversion, FormatError> {
    let doc = formats::html::parse_from_html(html)?;
    Ok(MarkdownSerializer::new(*options).convert(&doc))
}
