//! HTML format implementation
//!
//! This module implements HTML import: editor HTML → source tree.
//!
//! # Library Choice
//!
//! We use the `html5ever` + `markup5ever_rcdom` ecosystem for HTML parsing:
//! - `html5ever`: Browser-grade HTML5 parser from the Servo project
//! - `markup5ever_rcdom`: Reference-counted DOM tree implementation
//!
//! This choice is based on:
//! - The input is produced by a browser's own HTML serializer, so it should be read
//!   back with the same tree-construction rules (implicit `<tbody>`, auto-closed
//!   paragraphs, misnested formatting)
//! - WHATWG HTML5 specification compliance
//! - Handles malformed HTML gracefully
//!
//! The rcdom tree is shared-ownership and interior-mutable. The serializer wants an
//! immutable tree it can deep-copy cheaply, so the body subtree is copied into the
//! owned model in [`crate::dom`] right after parsing.
//!
//! # What Is Kept
//!
//! | HTML construct            | Source tree                  |
//! |---------------------------|------------------------------|
//! | Element                   | `Element` (tag, attrs, kids) |
//! | Text                      | `Node::Text`, verbatim       |
//! | Comment / doctype / PI    | dropped                      |
//! | `<head>` content          | dropped (only body is kept)  |
//! | Nesting past 1024 levels  | dropped, `Document::depth_limit` set |
//!
//! # Implementation Status
//!
//! - [x] Import (HTML → source tree)
//! - [ ] Export: not planned, the tree is an input model only

mod parser;

pub use parser::{parse_from_html, MAX_TREE_DEPTH};

use crate::dom::Document;
use crate::error::FormatError;
use crate::format::Format;

/// Format implementation for HTML
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlFormat;

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML5 fragment from a rich-text editor"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, FormatError> {
        parser::parse_from_html(source)
    }
}
