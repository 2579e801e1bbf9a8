//! List rendering: bullet, ordered and task items with nesting.
//!
//! Nesting comes from two sources: real nested `<ul>`/`<ol>` inside an item, and the
//! editor's flat lists whose items carry an `ql-indent-N` class.

use super::context::{SerializationContext, SerializerState};
use super::footnotes::recognize_definition;
use super::serializer::{register_definition, serialize_node};
use crate::dom::{Element, Node};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemKind {
    Bullet,
    Ordered,
    Checked,
    Unchecked,
}

impl ItemKind {
    /// Item-local `data-list` hint first, then the list tag.
    fn detect(item: &Element, ordered_list: bool) -> Self {
        let hint = item.attr("data-list").unwrap_or("").to_lowercase();
        match hint.as_str() {
            "bullet" => ItemKind::Bullet,
            "ordered" => ItemKind::Ordered,
            "checked" => ItemKind::Checked,
            "unchecked" => ItemKind::Unchecked,
            _ if ordered_list => ItemKind::Ordered,
            _ => ItemKind::Bullet,
        }
    }

    fn checkbox(self) -> Option<&'static str> {
        match self {
            ItemKind::Checked => Some("[x]"),
            ItemKind::Unchecked => Some("[ ]"),
            ItemKind::Bullet | ItemKind::Ordered => None,
        }
    }
}

/// Deepest `ql-indent-N` the editor produces; larger values are clamped.
const MAX_INDENT: usize = 8;

fn indent_level(item: &Element) -> usize {
    item.classes()
        .find_map(|class| class.strip_prefix("ql-indent-"))
        .map(|level| {
            if !level.is_empty() && level.bytes().all(|b| b.is_ascii_digit()) {
                level.parse().unwrap_or(MAX_INDENT).min(MAX_INDENT)
            } else {
                0
            }
        })
        .unwrap_or(0)
}

/// Render a `<ul>` / `<ol>`. Items sit one level below `ctx.depth()`.
pub fn render_list(
    list: &Element,
    ordered: bool,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let base = ctx.depth();
    // One counter per indent level.
    let mut counters: Vec<usize> = Vec::new();
    let mut out = String::new();

    for item in list.child_elements().filter(|child| child.is("li")) {
        let item_ctx = ctx.descend(item);
        if state.options.footnotes && !ctx.skip_footnote_capture() {
            if let Some(definition) = recognize_definition(item) {
                register_definition(definition, item_ctx, state);
                continue;
            }
        }

        let kind = ItemKind::detect(item, ordered);
        let indent = indent_level(item);
        counters.truncate(indent + 1);
        counters.resize(indent + 1, 0);
        if kind == ItemKind::Ordered {
            counters[indent] += 1;
        }
        let item_ctx = item_ctx.with_depth(base + 1 + indent);
        out.push_str(&render_item(item, kind, counters[indent], item_ctx, state));
    }

    if out.is_empty() {
        out
    } else {
        out.push('\n');
        out
    }
}

fn render_item(
    item: &Element,
    kind: ItemKind,
    number: usize,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let mut content = String::new();
    let mut nested = Vec::new();
    for child in &item.children {
        match child {
            Node::Element(el) if el.is("ul") || el.is("ol") => {
                let list = serialize_node(child, ctx.with_inline(false), state);
                let list = list.trim_end_matches('\n');
                if !list.is_empty() {
                    nested.push(list.to_string());
                }
            }
            _ => content.push_str(&serialize_node(child, ctx.with_inline(true), state)),
        }
    }

    let mut content = content.trim().to_string();
    if let Some(checkbox) = kind.checkbox() {
        content = if content.is_empty() {
            checkbox.to_string()
        } else {
            format!("{checkbox} {content}")
        };
    }

    let nested = nested.join("\n");
    if content.is_empty() {
        return if nested.is_empty() {
            nested
        } else {
            format!("{nested}\n")
        };
    }

    let indent = "  ".repeat(ctx.depth().saturating_sub(1));
    let marker = match kind {
        ItemKind::Ordered => format!("{number}."),
        _ => "-".to_string(),
    };
    let continuation = format!("{indent}{}", " ".repeat(marker.chars().count() + 1));

    let mut lines = content.split('\n');
    let mut result = format!("{indent}{marker} {}", lines.next().unwrap_or(""));
    for line in lines {
        result.push('\n');
        result.push_str(&continuation);
        result.push_str(line);
    }
    result.push('\n');

    if !nested.is_empty() {
        result.push_str(&nested);
        result.push('\n');
    }
    result
}
