//! Footnote recognition and accumulation.
//!
//! Editor HTML carries footnotes in several unrelated conventions:
//!
//! - word-processor exports: notes live in elements with ids like `_ftn1` / `_edn2`, or in
//!   paragraphs owning an anchor named `_ftn1`; references are anchors with `href="#_ftn1"`
//! - markdown-it style output: a `<section class="footnotes">` with an ordered list of
//!   `<li id="fn1">` items, referenced by `<sup><a href="#fn1">1</a></sup>`
//! - editors that only know superscripts: `<sup>ii</sup>` is the reference, the label is the
//!   visible text
//!
//! Recognition is split in two independent paths feeding one [`FootnoteRegistry`]:
//! definition recognition ([`recognize_definition`], [`collect_container`]) returns a
//! detached, cleaned copy of the note body for the serializer to render, and reference
//! resolution ([`resolve_anchor_reference`], [`superscript_reference`]) returns the label
//! of an in-text marker. Both sides agree on keys through [`normalize_label`], so a
//! reference written `II` meets a definition labelled `2`.

use super::context::SerializationContext;
use crate::dom::Element;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static NOTE_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^_(?:edn|ftn)\d+").unwrap());
static NOTE_ID_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)_(?:edn|ftn)([A-Za-z0-9_-]+)").unwrap());
static WORD_HREF: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#_(?:edn|ftn)([A-Za-z0-9_-]+)").unwrap());
static FN_HREF: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#fn:?([A-Za-z0-9_-]+)").unwrap());
static WORD_REF_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^_(?:edn|ftn)ref([A-Za-z0-9_-]+)").unwrap());
static LIST_ITEM_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)fn:?([A-Za-z0-9_-]+)").unwrap());
static BACKREF_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)backlink|backref|footnote-return").unwrap());
static ROMAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^M{0,4}(?:CM|CD|D?C{0,3})(?:XC|XL|L?X{0,3})(?:IX|IV|V?I{0,3})$").unwrap()
});
static LEADING_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\[(\s]+").unwrap());
static TRAILING_BRACKETS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\])\s.]+$").unwrap());

/// Tags that can own a note anchor when they carry no id themselves.
const OWNER_TAGS: &[&str] = &["p", "li", "dd", "dt"];

const RETURN_GLYPHS: &[&str] = &["↩", "↩\u{fe0e}", "↩\u{fe0f}", "↑", "return"];

/// A recognizer inspects one anchor and may produce a raw label.
type AnchorRecognizer = fn(&Element) -> Option<String>;

/// Label sources for an anchor, in priority order. Visible text ranks above the href.
const ANCHOR_RECOGNIZERS: &[AnchorRecognizer] = &[
    label_from_data_hint,
    label_from_text,
    label_from_word_href,
    label_from_fn_href,
    label_from_word_name,
];

/// Remove surrounding brackets, parentheses, spaces and trailing periods: `[1]`, `(ii).`.
pub fn strip_brackets(text: &str) -> String {
    let lead = LEADING_BRACKETS.replace(text, "");
    TRAILING_BRACKETS.replace(&lead, "").into_owned()
}

/// Decode a canonical Roman numeral (case-insensitive, up to 4999).
pub fn parse_roman_numeral(input: &str) -> Option<u32> {
    let value = input.trim().to_ascii_uppercase();
    if value.is_empty() || !ROMAN.is_match(&value) {
        return None;
    }

    let mut total = 0;
    let mut previous = 0;
    for c in value.chars().rev() {
        let current = match c {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => return None,
        };
        if current < previous {
            total -= current;
        } else {
            total += current;
            previous = current;
        }
    }
    Some(total)
}

/// Normalize a label into its registry key: trimmed, Roman numerals as decimals.
pub fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    match parse_roman_numeral(trimmed) {
        Some(value) => value.to_string(),
        None => trimmed.to_string(),
    }
}

/// Whether an id has the word-processor note shape `_ftn<digits>` / `_edn<digits>`.
pub fn is_note_id(id: &str) -> bool {
    NOTE_ID.is_match(id)
}

fn lowered_attr(element: &Element, name: &str) -> String {
    element.attr(name).unwrap_or("").trim().to_lowercase()
}

fn data_hint(anchor: &Element) -> Option<&str> {
    anchor
        .non_empty_attr("data-footnote-ref")
        .or_else(|| anchor.non_empty_attr("data-footnote-id"))
}

fn label_from_data_hint(anchor: &Element) -> Option<String> {
    data_hint(anchor).map(strip_brackets)
}

fn label_from_text(anchor: &Element) -> Option<String> {
    Some(strip_brackets(anchor.text_content().trim()))
}

fn capture(re: &Regex, value: &str) -> Option<String> {
    re.captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn label_from_word_href(anchor: &Element) -> Option<String> {
    capture(&WORD_HREF, &lowered_attr(anchor, "href"))
}

fn label_from_fn_href(anchor: &Element) -> Option<String> {
    capture(&FN_HREF, &lowered_attr(anchor, "href"))
}

fn label_from_word_name(anchor: &Element) -> Option<String> {
    capture(&WORD_REF_NAME, &lowered_attr(anchor, "name"))
}

/// Label of an anchor from the first recognizer that yields a non-empty value.
pub fn anchor_label(anchor: &Element) -> Option<String> {
    ANCHOR_RECOGNIZERS
        .iter()
        .filter_map(|recognize| recognize(anchor))
        .find(|label| !label.is_empty())
}

/// Whether an anchor looks like a footnote marker at all.
fn is_footnote_anchor(anchor: &Element) -> bool {
    if data_hint(anchor).is_some() {
        return true;
    }
    let href = lowered_attr(anchor, "href");
    let name = lowered_attr(anchor, "name");
    ["#_edn", "#_ftn", "#fn"]
        .iter()
        .any(|prefix| href.starts_with(prefix))
        || ["_edn", "_ftn"].iter().any(|prefix| name.starts_with(prefix))
}

/// Resolve an anchor as an in-text footnote reference.
///
/// `ctx` is the anchor's own context. Inside a note scope nothing resolves unless
/// `allow_definition` is set.
pub fn resolve_anchor_reference(
    anchor: &Element,
    ctx: &SerializationContext,
    allow_definition: bool,
) -> Option<String> {
    if !allow_definition && ctx.in_note_scope() {
        return None;
    }
    if !is_footnote_anchor(anchor) {
        return None;
    }
    anchor_label(anchor)
}

/// Resolve a superscript as a footnote reference.
///
/// Tries the first element child when it is an anchor, then the superscript's own
/// `data-footnote-ref`, then its visible text.
pub fn superscript_reference(sup: &Element, ctx: &SerializationContext) -> Option<String> {
    if let Some(anchor) = sup.first_element_child().filter(|child| child.is("a")) {
        if let Some(label) = resolve_anchor_reference(anchor, &ctx.descend(anchor), false) {
            return Some(label);
        }
    }
    if let Some(data) = sup.non_empty_attr("data-footnote-ref") {
        return Some(strip_brackets(data));
    }
    let label = strip_brackets(sup.text_content().trim());
    (!label.is_empty()).then_some(label)
}

/// The `[^key]` marker for a raw label; empty when the label normalizes to nothing.
pub fn reference_marker(label: &str) -> String {
    let key = normalize_label(label);
    if key.is_empty() {
        String::new()
    } else {
        format!("[^{key}]")
    }
}

/// A recognized footnote definition: its raw label and a detached, cleaned copy of the body.
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub label: String,
    pub body: Element,
}

fn starts_with_any(value: Option<&str>, prefixes: &[&str]) -> bool {
    value.is_some_and(|v| prefixes.iter().any(|prefix| v.starts_with(prefix)))
}

/// An anchor marking where a note body starts (`name="_ftn1"`), not a reference point
/// (`name="_ftnref1"`).
fn is_note_anchor(element: &Element) -> bool {
    if !element.is("a") {
        return false;
    }
    [element.attr("name"), element.attr("id")]
        .into_iter()
        .any(|value| {
            starts_with_any(value, &["_edn", "_ftn"])
                && !starts_with_any(value, &["_ednref", "_ftnref"])
        })
}

/// An anchor whose href, name or class signals some footnote role.
fn is_role_anchor(element: &Element) -> bool {
    if !element.is("a") {
        return false;
    }
    starts_with_any(element.attr("href"), &["#_edn", "#_ftn", "#fn"])
        || starts_with_any(element.attr("name"), &["_edn", "_ftn"])
        || element
            .attr("class")
            .is_some_and(|class| class.contains("Footnote") || class.contains("Endnote"))
}

fn is_backreference(anchor: &Element) -> bool {
    let href = lowered_attr(anchor, "href");
    let text = anchor.text_content();
    let text = text.trim();
    anchor
        .attr("class")
        .is_some_and(|class| BACKREF_CLASS.is_match(class))
        || href.starts_with("#_ftnref")
        || href.starts_with("#_ednref")
        || href.starts_with("#fnref")
        || RETURN_GLYPHS.contains(&text)
}

fn is_self_reference(anchor: &Element, label: &str) -> bool {
    let href = lowered_attr(anchor, "href");
    ["#_ftn", "#_edn", "#fn"]
        .iter()
        .any(|prefix| href.starts_with(prefix))
        && anchor.text_content().trim() == label
}

/// Recognize an element as a footnote definition.
///
/// An element qualifies when it carries a note id, or when it is a paragraph, list item or
/// definition term/description that owns a note anchor. Any other id disqualifies it.
pub fn recognize_definition(element: &Element) -> Option<Definition> {
    if element.is("a") {
        return None;
    }

    let id = element.id().map(str::to_lowercase);
    let owned = element.find_descendant_with_ancestors(is_note_anchor);

    match &id {
        None => {
            if !OWNER_TAGS.contains(&element.tag.as_str()) {
                return None;
            }
            let (_, chain) = owned.as_ref()?;
            let owner = chain
                .iter()
                .rev()
                .find(|ancestor| OWNER_TAGS.contains(&ancestor.tag.as_str()))?;
            if !std::ptr::eq(*owner, element) {
                return None;
            }
        }
        Some(id) if !is_note_id(id) => return None,
        Some(_) => {}
    }

    let label = definition_label(element, owned.map(|(anchor, _)| anchor))?;
    let body = element
        .without_attr("id")
        .without_anchors(|anchor| is_backreference(anchor) || is_self_reference(anchor, &label));

    Some(Definition { label, body })
}

fn definition_label(element: &Element, owned: Option<&Element>) -> Option<String> {
    let anchor = match owned {
        Some(anchor) => Some(anchor),
        None => element.find_descendant(is_role_anchor),
    };
    if let Some(label) = anchor.and_then(anchor_label) {
        return Some(label);
    }
    element.id().and_then(|id| capture(&NOTE_ID_LABEL, id))
}

/// Whether a container element is an explicit footnotes section.
pub fn is_footnotes_container(element: &Element) -> bool {
    element.has_class("footnotes")
}

fn container_item_label(item: &Element) -> Option<String> {
    if let Some(label) = item.id().and_then(|id| capture(&LIST_ITEM_ID, id)) {
        return Some(label);
    }
    if let Some(label) = item.non_empty_attr("data-footnote-label") {
        return Some(label.to_string());
    }
    let anchor = item.find_descendant(|e| e.is("a"))?;
    let text = match anchor.non_empty_attr("data-footnote-ref") {
        Some(data) => data.to_string(),
        None => anchor.text_content(),
    };
    let label = strip_brackets(text.trim());
    (!label.is_empty()).then_some(label)
}

/// Collect the items of every list inside a footnotes section, nested lists included.
pub fn collect_container(container: &Element) -> Vec<Definition> {
    let mut definitions = Vec::new();
    for list in container
        .descendants()
        .into_iter()
        .filter(|e| e.is("ol") || e.is("ul"))
    {
        for item in list.child_elements().filter(|e| e.is("li")) {
            let Some(raw) = container_item_label(item) else {
                continue;
            };
            let label = normalize_label(&raw);
            if label.is_empty() {
                continue;
            }
            let body = item.without_anchors(|anchor| {
                anchor
                    .attr("href")
                    .is_some_and(|href| href.starts_with("#fnref"))
            });
            definitions.push(Definition { label, body });
        }
    }
    definitions
}

/// Ordered, deduplicated footnote definitions of one conversion.
#[derive(Debug, Default)]
pub struct FootnoteRegistry {
    definitions: Vec<String>,
    seen: HashSet<String>,
}

impl FootnoteRegistry {
    /// Register a definition. The first registration of a key wins; empty labels and
    /// empty content are ignored. Returns whether the definition was added.
    pub fn register(&mut self, label: &str, content: &str) -> bool {
        if content.is_empty() {
            return false;
        }
        let key = normalize_label(label);
        if key.is_empty() {
            return false;
        }
        if !self.seen.insert(key.clone()) {
            log::debug!("ignoring duplicate footnote definition [^{key}]");
            return false;
        }
        log::debug!("registered footnote definition [^{key}]");
        let content = content.replace('\n', "\n    ");
        self.definitions.push(format!("[^{key}]: {content}"));
        true
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Formatted `[^key]: content` entries in registration order.
    pub fn definitions(&self) -> &[String] {
        &self.definitions
    }

    /// All definitions joined by newlines.
    pub fn render(&self) -> String {
        self.definitions.join("\n")
    }
}
