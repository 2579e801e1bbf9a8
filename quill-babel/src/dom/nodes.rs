//! Core data structures for the source tree.

/// A node of the source tree: either an element or a run of text.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

impl Node {
    /// Create a text node.
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Returns the element if this node is one.
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An HTML element with its attributes and ordered children.
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an element without attributes or children.
    pub fn new(tag: impl Into<String>) -> Self {
        Element {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    /// Builder: append a child node.
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder: append a text child.
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.with_child(Node::text(text))
    }

    /// Whether this element has the given tag name.
    pub fn is(&self, tag: &str) -> bool {
        self.tag == tag
    }

    /// Value of the named attribute, if present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the named attribute, treating an empty value as absent.
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|value| !value.is_empty())
    }

    /// The element's `id`, if it carries a non-empty one.
    pub fn id(&self) -> Option<&str> {
        self.non_empty_attr("id")
    }

    /// Class tokens of the element, in attribute order.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or("").split_ascii_whitespace()
    }

    /// Whether the class list contains exactly this token.
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|token| token == class)
    }

    /// Child elements, skipping text nodes.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The first child that is an element.
    pub fn first_element_child(&self) -> Option<&Element> {
        self.child_elements().next()
    }
}

/// A parsed document: the content of the HTML `<body>`.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub body: Element,
    /// Set when the parser dropped elements nested deeper than this many levels.
    pub depth_limit: Option<usize>,
}

impl Document {
    pub fn new(body: Element) -> Self {
        Document {
            body,
            depth_limit: None,
        }
    }

    /// Build a document from top-level nodes.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        let mut body = Element::new("body");
        body.children = nodes;
        Document::new(body)
    }
}
