//! Element classification for the serializer's dispatch.

/// Tags that render as blocks when no dedicated handler exists.
const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "canvas",
    "dd",
    "div",
    "dl",
    "dt",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "header",
    "hr",
    "li",
    "main",
    "nav",
    "noscript",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "tfoot",
    "ul",
];

/// The kind of an element, as far as Markdown output is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Heading(usize),
    Paragraph,
    LineBreak,
    Strong,
    Emphasis,
    Strikethrough,
    InlineCode,
    Preformatted,
    Blockquote,
    HorizontalRule,
    Superscript,
    Link,
    Image,
    List { ordered: bool },
    ListItem,
    Table,
    TablePart,
    Container,
    NonContent,
    Other { block: bool },
}

impl ElementKind {
    /// Classify a lowercase tag name.
    pub fn of(tag: &str) -> Self {
        match tag {
            "h1" => ElementKind::Heading(1),
            "h2" => ElementKind::Heading(2),
            "h3" => ElementKind::Heading(3),
            "h4" => ElementKind::Heading(4),
            "h5" => ElementKind::Heading(5),
            "h6" => ElementKind::Heading(6),
            "p" => ElementKind::Paragraph,
            "br" => ElementKind::LineBreak,
            "strong" | "b" => ElementKind::Strong,
            "em" | "i" => ElementKind::Emphasis,
            "del" | "s" | "strike" => ElementKind::Strikethrough,
            "code" => ElementKind::InlineCode,
            "pre" => ElementKind::Preformatted,
            "blockquote" => ElementKind::Blockquote,
            "hr" => ElementKind::HorizontalRule,
            "sup" => ElementKind::Superscript,
            "a" => ElementKind::Link,
            "img" => ElementKind::Image,
            "ul" => ElementKind::List { ordered: false },
            "ol" => ElementKind::List { ordered: true },
            "li" => ElementKind::ListItem,
            "table" => ElementKind::Table,
            "thead" | "tbody" | "tfoot" | "tr" | "th" | "td" => ElementKind::TablePart,
            "div" | "section" | "aside" => ElementKind::Container,
            "script" | "style" | "template" | "head" => ElementKind::NonContent,
            other => ElementKind::Other {
                block: BLOCK_TAGS.contains(&other),
            },
        }
    }
}
