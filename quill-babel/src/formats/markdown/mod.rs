//! Markdown format implementation
//!
//! This module implements export from the source tree to Markdown. Import is not
//! supported: the tool reads editor HTML and writes Markdown, never the reverse.
//!
//! # Library Choice
//!
//! The serializer is hand-written over the owned DOM rather than built on a Markdown
//! library. Markdown crates render from their own AST, and the interesting part of this
//! conversion (recognizing footnotes across word-processor, markdown-it and bare
//! superscript conventions) happens on the HTML side before any Markdown AST would exist.
//! `regex` carries the label and id patterns, compiled once through `once_cell`.
//!
//! # Element Mapping Table
//!
//! | HTML                          | Markdown                         | Notes                                  |
//! |-------------------------------|----------------------------------|----------------------------------------|
//! | `h1`..`h6`                    | `#`..`######`                    | empty headings dropped                 |
//! | `p`                           | paragraph                        | empty paragraphs dropped               |
//! | `br`                          | hard break / newline             |                                        |
//! | `strong`, `b`                 | `**text**`                       |                                        |
//! | `em`, `i`                     | `*text*`                         |                                        |
//! | `del`, `s`, `strike`          | `~~text~~`                       |                                        |
//! | `code`                        | `` `code` ``                     | ticks sized past inner backtick runs   |
//! | `pre`                         | fenced block                     | language from `data-language`, `lang`, `language-*` |
//! | `blockquote`                  | `> ` lines                       |                                        |
//! | `hr`                          | `---`                            |                                        |
//! | `a`                           | `[text](href "title")`           | or `[^key]` when a footnote reference  |
//! | `img`                         | `![alt](src "title")`            | dropped without `src`                  |
//! | `ul`, `ol`, `li`              | `-`, `1.`, `- [x]`               | `data-list` and `ql-indent-N` honoured |
//! | `table`                       | pipe table                       | cells always inline                    |
//! | `sup`                         | `[^key]` or `^text^`             |                                        |
//! | `section.footnotes` et al.    | `[^key]: text` after the body    |                                        |
//! | `script`, `style`, `template` | nothing                          |                                        |
//!
//! # Lossy Conversions
//!
//! - Hard line breaks inside paragraphs lose their two trailing spaces in the final
//!   trailing-whitespace pass
//! - Table cells are flattened to one line of inline content
//! - Body text is not Markdown-escaped
//!
//! # Parameters
//!
//! `serialize_with_options` understands `max-depth` (nesting guard, default 256) and
//! `footnotes` (`false` renders footnote markup as ordinary links and superscripts).

mod context;
pub mod escape;
pub mod footnotes;
mod kind;
mod lists;
pub mod normalize;
mod options;
mod serializer;
mod tables;

pub use context::{SerializationContext, SerializerState};
pub use kind::ElementKind;
pub use options::{MarkdownOptions, DEFAULT_MAX_DEPTH};
pub use serializer::{serialize_to_markdown, Conversion, MarkdownSerializer};

use crate::dom::Document;
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;

/// Format implementation for Markdown
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownFormat;

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "Markdown with footnotes, tables and task lists"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        serializer::serialize_to_markdown(doc)
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let options = MarkdownOptions::from_params(options)?;
        MarkdownSerializer::new(options).serialize(doc)
    }
}
