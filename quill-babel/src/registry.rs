//! Name-keyed lookup of the available formats.
//!
//! The CLI resolves `--from`, `--to` and input file extensions through a
//! [`FormatRegistry`]. Formats are kept in name order so listings and extension
//! detection come out the same on every run.

use crate::dom::Document;
use crate::error::FormatError;
use crate::format::{Direction, Format};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// The formats a conversion can go through.
///
/// # Examples
///
/// ```ignore
/// let registry = FormatRegistry::default();
///
/// let doc = registry.parse(r##"<p>Claim<sup><a href="#fn1">1</a></sup></p>"##, "html")?;
/// let markdown = registry.serialize(&doc, "markdown")?;
/// assert_eq!(markdown, "Claim[^1]\n");
/// ```
pub struct FormatRegistry {
    formats: BTreeMap<String, Box<dyn Format>>,
}

impl FormatRegistry {
    /// A registry with no formats.
    pub fn new() -> Self {
        FormatRegistry {
            formats: BTreeMap::new(),
        }
    }

    /// Add a format, replacing any format registered under the same name.
    pub fn register<F: Format + 'static>(&mut self, format: F) {
        self.formats
            .insert(format.name().to_string(), Box::new(format));
    }

    pub fn get(&self, name: &str) -> Result<&dyn Format, FormatError> {
        self.formats
            .get(name)
            .map(|f| f.as_ref())
            .ok_or_else(|| FormatError::FormatNotFound(name.to_string()))
    }

    pub fn has(&self, name: &str) -> bool {
        self.formats.contains_key(name)
    }

    /// Format names in sorted order.
    pub fn list_formats(&self) -> Vec<String> {
        self.formats.keys().cloned().collect()
    }

    /// Format whose extensions include the extension of `filename`, compared
    /// case-insensitively (`NOTES.HTM` is html). First match in name order wins.
    pub fn detect_format_from_filename(&self, filename: &str) -> Option<String> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())?
            .to_ascii_lowercase();

        self.formats
            .iter()
            .find(|(_, format)| format.file_extensions().contains(&extension.as_str()))
            .map(|(name, _)| name.clone())
    }

    /// Look a format up and check it can be used in `direction`.
    fn capable(&self, name: &str, direction: Direction) -> Result<&dyn Format, FormatError> {
        let format = self.get(name)?;
        if format.supports(direction) {
            Ok(format)
        } else {
            Err(direction.unsupported(name))
        }
    }

    pub fn parse(&self, source: &str, format: &str) -> Result<Document, FormatError> {
        self.capable(format, Direction::Parse)?.parse(source)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> Result<String, FormatError> {
        self.serialize_with_options(doc, format, &HashMap::new())
    }

    pub fn serialize_with_options(
        &self,
        doc: &Document,
        format: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        self.capable(format, Direction::Serialize)?
            .serialize_with_options(doc, options)
    }

    /// Parse with one format and serialize with another.
    ///
    /// Both formats are checked before the source is parsed.
    pub fn convert(
        &self,
        source: &str,
        from: &str,
        to: &str,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let reader = self.capable(from, Direction::Parse)?;
        let writer = self.capable(to, Direction::Serialize)?;
        let doc = reader.parse(source)?;
        writer.serialize_with_options(&doc, options)
    }

    /// html in, markdown and treeviz out.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();

        registry.register(crate::formats::html::HtmlFormat);
        registry.register(crate::formats::markdown::MarkdownFormat);
        registry.register(crate::formats::treeviz::TreevizFormat);

        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
