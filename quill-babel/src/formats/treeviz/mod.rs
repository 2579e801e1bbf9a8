//! Treeviz formatter for the parsed source tree
//!
//! Treeviz is a visual dump of the tree the HTML front end produced, meant for finding out
//! why some markup did or did not turn into the expected Markdown. Each node is one line:
//!
//! <prefix><connector> <icon> <label>
//!
//! Elements are labelled `tag#id.class` plus their link target; text runs show their
//! whitespace-collapsed content. Labels are truncated to 30 characters by default.
//! Whitespace-only text runs are left out.
//!
//! When footnote annotation is on, nodes the Markdown serializer would treat as footnote
//! definitions or references are marked:
//!
//! ```text
//! ⧉ Document (2 nodes)
//! ├─ ¶ p
//! │ ├─ ◦ Body
//! │ └─ ³ sup  [ref 1]
//! │   └─ ⊕ a href=#fn1  [ref 1]
//! │     └─ ◦ 1
//! └─ ➔ section.footnotes  [footnotes]
//!   └─ ☰ ol
//!     └─ • li#fn1
//!       └─ ◦ The note.
//! ```

use super::icons::get_icon;
use super::markdown::footnotes::{
    is_footnotes_container, normalize_label, recognize_definition, resolve_anchor_reference,
    superscript_reference,
};
use super::markdown::normalize::collapse_whitespace;
use super::markdown::SerializationContext;
use crate::dom::{Document, Element, Node};
use crate::error::FormatError;
use crate::format::Format;
use std::collections::HashMap;

const DEFAULT_LABEL_WIDTH: usize = 30;

#[derive(Debug, Clone, Copy)]
struct TreevizOptions {
    label_width: usize,
    footnotes: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        TreevizOptions {
            label_width: DEFAULT_LABEL_WIDTH,
            footnotes: true,
        }
    }
}

impl TreevizOptions {
    fn from_params(params: &HashMap<String, String>) -> Result<Self, FormatError> {
        let mut options = Self::default();
        if let Some(value) = params.get("label-width") {
            options.label_width = value.trim().parse().map_err(|_| {
                FormatError::InvalidParameter {
                    name: "label-width".to_string(),
                    value: value.clone(),
                }
            })?;
        }
        if let Some(value) = params.get("footnotes") {
            options.footnotes = value.to_lowercase() != "false";
        }
        Ok(options)
    }
}

fn truncate(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let kept: String = label.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

fn element_label(element: &Element) -> String {
    let mut label = element.tag.clone();
    if let Some(id) = element.id() {
        label.push('#');
        label.push_str(id);
    }
    for class in element.classes() {
        label.push('.');
        label.push_str(class);
    }
    for name in ["href", "src", "name"] {
        if let Some(value) = element.non_empty_attr(name) {
            label.push_str(&format!(" {name}={value}"));
        }
    }
    label
}

/// Marker describing how the Markdown serializer would read this element.
fn footnote_role(element: &Element, ctx: &SerializationContext) -> Option<String> {
    if let Some(definition) = recognize_definition(element) {
        return Some(format!("note {}", normalize_label(&definition.label)));
    }
    let reference = if element.is("a") {
        resolve_anchor_reference(element, ctx, false)
    } else if element.is("sup") {
        superscript_reference(element, ctx)
    } else {
        None
    };
    if let Some(label) = reference {
        return Some(format!("ref {}", normalize_label(&label)));
    }
    if matches!(element.tag.as_str(), "div" | "section" | "aside")
        && is_footnotes_container(element)
    {
        return Some("footnotes".to_string());
    }
    None
}

fn visible_children(element: &Element) -> Vec<&Node> {
    element
        .children
        .iter()
        .filter(|child| match child {
            Node::Text(text) => !text.trim().is_empty(),
            Node::Element(_) => true,
        })
        .collect()
}

fn format_node(
    node: &Node,
    prefix: &str,
    is_last: bool,
    ctx: SerializationContext,
    options: &TreevizOptions,
) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    match node {
        Node::Text(text) => {
            let label = collapse_whitespace(text);
            format!(
                "{prefix}{connector} {} {}\n",
                get_icon("#text"),
                truncate(label.trim(), options.label_width)
            )
        }
        Node::Element(element) => {
            let ctx = ctx.descend(element);
            let mut output = format!(
                "{prefix}{connector} {} {}",
                get_icon(&element.tag),
                truncate(&element_label(element), options.label_width)
            );
            if options.footnotes {
                if let Some(role) = footnote_role(element, &ctx) {
                    output.push_str(&format!("  [{role}]"));
                }
            }
            output.push('\n');

            let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
            output + &format_children(element, &child_prefix, ctx, options)
        }
    }
}

fn format_children(
    element: &Element,
    prefix: &str,
    ctx: SerializationContext,
    options: &TreevizOptions,
) -> String {
    let children = visible_children(element);
    let count = children.len();
    children
        .into_iter()
        .enumerate()
        .map(|(i, child)| format_node(child, prefix, i + 1 == count, ctx, options))
        .collect()
}

fn render(doc: &Document, options: &TreevizOptions) -> String {
    let count = visible_children(&doc.body).len();
    let header = format!("{} Document ({count} nodes)\n", get_icon("#document"));
    header + &format_children(&doc.body, "", SerializationContext::root(), options)
}

pub fn to_treeviz_str(doc: &Document) -> String {
    render(doc, &TreevizOptions::default())
}

/// Convert a document to treeviz string with optional parameters
///
/// # Parameters
///
/// - `"label-width"`: maximum label length in characters (default 30)
/// - `"footnotes"`: set to `"false"` to leave out the footnote role markers
pub fn to_treeviz_str_with_params(
    doc: &Document,
    params: &HashMap<String, String>,
) -> Result<String, FormatError> {
    let options = TreevizOptions::from_params(params)?;
    Ok(render(doc, &options))
}

/// Format implementation for treeviz format
#[derive(Debug, Default, Clone, Copy)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree of the parsed HTML with footnote role markers"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    fn serialize_with_options(
        &self,
        doc: &Document,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        to_treeviz_str_with_params(doc, options)
    }
}
