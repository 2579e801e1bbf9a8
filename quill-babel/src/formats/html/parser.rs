//! HTML parsing (HTML → source tree)
//!
//! Parses with html5ever into an `RcDom`, then copies the `<body>` subtree into the
//! owned [`Document`] model. Comments, doctypes and processing instructions are
//! dropped; template contents are not part of the body tree and are ignored.

use crate::dom::{Document, Element, Node};
use crate::error::FormatError;
use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

/// Element nesting below `<body>` that survives the copy into the source tree.
///
/// Deeper subtrees are dropped and the document is marked with
/// [`Document::depth_limit`].
pub const MAX_TREE_DEPTH: usize = 1024;

/// Parse an HTML fragment (or full document) into a source tree.
pub fn parse_from_html(source: &str) -> Result<Document, FormatError> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: true,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut source.as_bytes())
        .map_err(|e| FormatError::MalformedInput(e.to_string()))?;

    let body = find_element(&dom.document, "body").ok_or_else(|| {
        FormatError::MalformedInput("parsed document has no body element".to_string())
    })?;

    let mut copy = TreeCopy::new(MAX_TREE_DEPTH);
    match copy.node(&body, 0) {
        Some(Node::Element(element)) => {
            let mut doc = Document::new(element);
            if copy.truncated {
                log::warn!("HTML nesting exceeds {MAX_TREE_DEPTH} levels; dropping deeper content");
                doc.depth_limit = Some(MAX_TREE_DEPTH);
            }
            Ok(doc)
        }
        _ => Err(FormatError::MalformedInput(
            "body element could not be converted".to_string(),
        )),
    }
}

/// First element with the given local name, in document order.
fn find_element(root: &Handle, tag: &str) -> Option<Handle> {
    let mut stack: Vec<Handle> = root.children.borrow().iter().rev().cloned().collect();
    while let Some(handle) = stack.pop() {
        if let NodeData::Element { ref name, .. } = handle.data {
            if name.local.as_ref() == tag {
                return Some(handle);
            }
        }
        stack.extend(handle.children.borrow().iter().rev().cloned());
    }
    None
}

/// Copies rcdom nodes into the owned model, stopping at a fixed depth.
struct TreeCopy {
    limit: usize,
    truncated: bool,
}

impl TreeCopy {
    fn new(limit: usize) -> Self {
        TreeCopy {
            limit,
            truncated: false,
        }
    }

    fn node(&mut self, handle: &Handle, depth: usize) -> Option<Node> {
        match handle.data {
            NodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                if depth > self.limit {
                    self.truncated = true;
                    return None;
                }
                let attrs = attrs
                    .borrow()
                    .iter()
                    .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                    .collect();
                let children = handle
                    .children
                    .borrow()
                    .iter()
                    .filter_map(|child| self.node(child, depth + 1))
                    .collect();
                Some(Node::Element(Element {
                    tag: name.local.to_string(),
                    attrs,
                    children,
                }))
            }
            NodeData::Text { ref contents } => Some(Node::Text(contents.borrow().to_string())),
            _ => None,
        }
    }
}
