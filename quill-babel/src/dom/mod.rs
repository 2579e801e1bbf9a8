//! Source tree for the HTML → Markdown conversion.
//!
//! This module defines the owned element/text tree that the Markdown serializer walks.
//! It is produced by the HTML front end (./formats/html) from the html5ever parse tree
//! and is never mutated by the serializer: footnote handling works on deep copies.
//!
//! Tag and attribute names are stored the way the HTML parser delivers them (ASCII
//! lowercase). Attribute values are kept verbatim.

pub mod nodes;
pub mod query;

pub use nodes::{Document, Element, Node};
