//! The `Format` trait: one side of a conversion.
//!
//! A format either reads text into the source tree ([`Document`]), writes the tree back
//! out as text, or both. Editor HTML only ever comes in and Markdown only ever goes out,
//! so in practice every format here is one-directional; the trait still keeps both
//! directions so the registry can answer "can X be read?" uniformly.

use crate::dom::Document;
use crate::error::FormatError;
use std::collections::HashMap;
use std::fmt;

/// Which way a format is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Text into the source tree.
    Parse,
    /// Source tree into text.
    Serialize,
}

impl Direction {
    pub const ALL: [Direction; 2] = [Direction::Parse, Direction::Serialize];

    /// The error a format returns for a direction it does not implement.
    pub fn unsupported(self, format: &str) -> FormatError {
        let verb = match self {
            Direction::Parse => "parsing",
            Direction::Serialize => "serialization",
        };
        FormatError::NotSupported(format!("Format '{format}' does not support {verb}"))
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Parse => f.write_str("parse"),
            Direction::Serialize => f.write_str("serialize"),
        }
    }
}

/// A named text format the registry can convert from or to.
///
/// Only `name` is required. A format opts into a direction by overriding both the
/// `supports_*` flag and the matching method; the defaults refuse with
/// [`FormatError::NotSupported`].
///
/// # Examples
///
/// ```ignore
/// /// Emits only the visible text of the body, one block per line.
/// struct PlainText;
///
/// impl Format for PlainText {
///     fn name(&self) -> &str {
///         "text"
///     }
///
///     fn supports_serialization(&self) -> bool {
///         true
///     }
///
///     fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
///         Ok(doc.body.text_content())
///     }
/// }
/// ```
pub trait Format: Send + Sync {
    /// Registry key, also accepted by `--from` / `--to`.
    fn name(&self) -> &str;

    /// One-line summary shown by `--list-formats`.
    fn description(&self) -> &str {
        ""
    }

    /// Extensions (no leading dot) that select this format for an input path.
    fn file_extensions(&self) -> &[&str] {
        &[]
    }

    fn supports_parsing(&self) -> bool {
        false
    }

    fn supports_serialization(&self) -> bool {
        false
    }

    fn supports(&self, direction: Direction) -> bool {
        match direction {
            Direction::Parse => self.supports_parsing(),
            Direction::Serialize => self.supports_serialization(),
        }
    }

    fn parse(&self, _source: &str) -> Result<Document, FormatError> {
        Err(Direction::Parse.unsupported(self.name()))
    }

    fn serialize(&self, _doc: &Document) -> Result<String, FormatError> {
        Err(Direction::Serialize.unsupported(self.name()))
    }

    /// Serialize with `--extra-*` parameters.
    ///
    /// The default accepts an empty map only, so formats without knobs reject stray
    /// parameters instead of silently ignoring them.
    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        if options.is_empty() {
            self.serialize(doc)
        } else {
            Err(FormatError::NotSupported(format!(
                "Format '{}' does not support extra parameters",
                self.name()
            )))
        }
    }
}
