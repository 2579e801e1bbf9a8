//! Markdown serialization (source tree → Markdown)
//!
//! One recursive walk over the body produces Markdown fragments; footnote definitions
//! found on the way are collected in the [`SerializerState`] and appended after the body,
//! then the whole text goes through the normalization passes.

use super::context::{SerializationContext, SerializerState};
use super::escape::{escape_link_text, escape_title, fenced_block, inline_code, normalize_line_endings};
use super::footnotes::{
    collect_container, is_footnotes_container, recognize_definition, reference_marker,
    resolve_anchor_reference, superscript_reference, Definition,
};
use super::kind::ElementKind;
use super::normalize::{collapse_whitespace, normalize, repair_footnote_definitions};
use super::options::MarkdownOptions;
use super::{lists, tables};
use crate::dom::{Document, Element, Node};
use crate::error::FormatError;
use once_cell::sync::Lazy;
use regex::Regex;

static LANGUAGE_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"language-([A-Za-z0-9_-]+)").unwrap());

/// Result of a best-effort conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversion {
    pub markdown: String,
    /// Recoverable problems met on the way; the markdown is complete apart from them.
    pub errors: Vec<FormatError>,
}

/// Serializer from the source tree to Markdown.
#[derive(Debug, Clone, Default)]
pub struct MarkdownSerializer {
    options: MarkdownOptions,
}

impl MarkdownSerializer {
    pub fn new(options: MarkdownOptions) -> Self {
        MarkdownSerializer { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Convert a document, never failing. Dropped content is reported in
    /// [`Conversion::errors`].
    pub fn convert(&self, doc: &Document) -> Conversion {
        let mut state = SerializerState::new(&self.options);
        let body = serialize_children(&doc.body, SerializationContext::root(), &mut state);
        if let Some(limit) = doc.depth_limit {
            state.record_depth_limit(limit);
        }
        let markdown = assemble(body.trim(), &state);
        Conversion {
            markdown,
            errors: state.errors,
        }
    }

    /// Convert a document, failing on the first recorded error.
    pub fn serialize(&self, doc: &Document) -> Result<String, FormatError> {
        let conversion = self.convert(doc);
        match conversion.errors.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(conversion.markdown),
        }
    }
}

/// Convert a document with default options.
pub fn serialize_to_markdown(doc: &Document) -> Result<String, FormatError> {
    MarkdownSerializer::default().serialize(doc)
}

fn assemble(body: &str, state: &SerializerState) -> String {
    let mut combined = normalize(body);
    if !state.footnotes.is_empty() {
        if !combined.is_empty() {
            combined.push_str("\n\n");
        }
        combined.push_str(&state.footnotes.render());
    }
    let repaired = repair_footnote_definitions(&combined);
    let mut markdown = normalize(&repaired).trim_end().to_string();
    markdown.push('\n');
    markdown
}

pub(super) fn serialize_children(
    parent: &Element,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let mut out = String::new();
    for child in &parent.children {
        out.push_str(&serialize_node(child, ctx, state));
    }
    out
}

/// Serialize one child node; `ctx` is the parent's context.
pub(super) fn serialize_node(
    node: &Node,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    match node {
        Node::Text(text) => collapse_whitespace(text),
        Node::Element(element) => serialize_element(element, ctx.descend(element), state),
    }
}

fn serialize_element(
    element: &Element,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    if state.exceeds_depth(&ctx) {
        return String::new();
    }

    let footnotes = state.options.footnotes;
    if footnotes && !ctx.skip_footnote_capture() {
        if let Some(definition) = recognize_definition(element) {
            register_definition(definition, ctx, state);
            return String::new();
        }
    }

    match ElementKind::of(&element.tag) {
        ElementKind::Heading(level) => {
            let text = inline_children(element, ctx, state);
            if text.is_empty() {
                String::new()
            } else {
                format!("{} {text}\n\n", "#".repeat(level))
            }
        }
        ElementKind::Paragraph => {
            let text = inline_children(element, ctx, state);
            if text.is_empty() {
                String::new()
            } else {
                format!("{text}\n\n")
            }
        }
        ElementKind::LineBreak => {
            if ctx.inline() {
                "  \n".to_string()
            } else {
                "\n".to_string()
            }
        }
        ElementKind::Strong => wrap(element, "**", ctx, state),
        ElementKind::Emphasis => wrap(element, "*", ctx, state),
        ElementKind::Strikethrough => wrap(element, "~~", ctx, state),
        ElementKind::InlineCode => inline_code(&element.text_content()),
        ElementKind::Preformatted => code_block(element),
        ElementKind::Blockquote => blockquote(element, ctx, state),
        ElementKind::HorizontalRule => "---\n\n".to_string(),
        ElementKind::Superscript => {
            if footnotes {
                if let Some(label) = superscript_reference(element, &ctx) {
                    return reference_marker(&label);
                }
            }
            let text = inline_children(element, ctx, state);
            if text.is_empty() {
                String::new()
            } else {
                format!("^{text}^")
            }
        }
        ElementKind::Link => {
            if footnotes {
                if let Some(label) = resolve_anchor_reference(element, &ctx, false) {
                    return reference_marker(&label);
                }
            }
            link(element, ctx, state)
        }
        ElementKind::Image => image(element),
        ElementKind::List { ordered } => lists::render_list(element, ordered, ctx, state),
        ElementKind::ListItem => serialize_children(element, ctx.with_inline(true), state),
        ElementKind::Table => {
            let table = tables::render_table(element, ctx, state);
            if table.is_empty() {
                table
            } else {
                format!("{table}\n\n")
            }
        }
        ElementKind::TablePart | ElementKind::NonContent => String::new(),
        ElementKind::Container => {
            if footnotes && !ctx.skip_footnote_capture() && is_footnotes_container(element) {
                for definition in collect_container(element) {
                    register_definition(definition, ctx, state);
                }
                return String::new();
            }
            block_children(element, ctx, state)
        }
        ElementKind::Other { block: true } => block_children(element, ctx, state),
        ElementKind::Other { block: false } => serialize_children(element, ctx, state),
    }
}

pub(super) fn register_definition(
    definition: Definition,
    ctx: SerializationContext,
    state: &mut SerializerState,
) {
    let content = serialize_children(&definition.body, ctx.detached(), state);
    log::debug!("captured footnote definition '{}'", definition.label);
    state.footnotes.register(&definition.label, content.trim());
}

fn inline_children(
    element: &Element,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    serialize_children(element, ctx.with_inline(true), state)
        .trim()
        .to_string()
}

fn block_children(
    element: &Element,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let inner = serialize_children(element, ctx.with_inline(false), state);
    if inner.is_empty() {
        inner
    } else {
        format!("{inner}\n")
    }
}

fn wrap(
    element: &Element,
    marker: &str,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let text = serialize_children(element, ctx.with_inline(true), state);
    if text.is_empty() {
        text
    } else {
        format!("{marker}{text}{marker}")
    }
}

fn code_block(pre: &Element) -> String {
    let source = pre
        .first_element_child()
        .filter(|child| child.is("code"))
        .unwrap_or(pre);
    let raw = normalize_line_endings(&source.text_content());
    fenced_block(raw.trim_end(), &language_hint(source))
}

fn language_hint(element: &Element) -> String {
    if let Some(hint) = element
        .non_empty_attr("data-language")
        .or_else(|| element.non_empty_attr("lang"))
    {
        return hint.to_string();
    }
    element
        .attr("class")
        .and_then(|class| LANGUAGE_CLASS.captures(class))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn blockquote(
    element: &Element,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let inner = serialize_children(element, ctx.with_inline(false), state);
    let inner = inner.trim();
    if inner.is_empty() {
        return String::new();
    }
    let quoted: Vec<String> = inner
        .split('\n')
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {line}")
            }
        })
        .collect();
    format!("{}\n\n", quoted.join("\n"))
}

fn link(element: &Element, ctx: SerializationContext, state: &mut SerializerState) -> String {
    let href = element.attr("href").unwrap_or("").trim();
    let title = element.attr("title").unwrap_or("").trim();
    let text = inline_children(element, ctx, state);
    let text = if text.is_empty() { href } else { text.as_str() };

    if href.is_empty() {
        return text.to_string();
    }
    format!(
        "[{}]({href}{})",
        escape_link_text(text),
        title_part(title)
    )
}

fn image(element: &Element) -> String {
    let src = element.attr("src").unwrap_or("");
    if src.is_empty() {
        return String::new();
    }
    let alt = element.attr("alt").unwrap_or("");
    let title = element.attr("title").unwrap_or("");
    format!("![{alt}]({src}{})", title_part(title))
}

fn title_part(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" \"{}\"", escape_title(title))
    }
}
