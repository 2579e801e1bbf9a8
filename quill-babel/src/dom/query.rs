//! Tree queries used by the serializer.
//!
//! These are the small subset of DOM traversal the converter relies on: raw text
//! content, document-order descendant search (optionally reporting the ancestor
//! chain of the match) and copy-with-pruning for footnote definitions.

use super::nodes::{Element, Node};

impl Element {
    /// Concatenated raw text of all descendant text nodes, whitespace untouched.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self, &mut out);
        out
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        collect_descendants(self, &mut out);
        out
    }

    /// First descendant (document order) matching the predicate.
    pub fn find_descendant<P>(&self, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.find_descendant_with_ancestors(predicate)
            .map(|(found, _)| found)
    }

    /// First descendant matching the predicate together with its ancestor chain.
    ///
    /// The chain starts at `self` and ends at the direct parent of the match.
    pub fn find_descendant_with_ancestors<P>(&self, predicate: P) -> Option<(&Element, Vec<&Element>)>
    where
        P: Fn(&Element) -> bool,
    {
        let mut chain = vec![self];
        find_with_chain(self, &predicate, &mut chain)
    }

    /// Deep copy without the named attribute on the copied root.
    pub fn without_attr(&self, name: &str) -> Element {
        let mut copy = self.clone();
        copy.attrs.retain(|(key, _)| key != name);
        copy
    }

    /// Deep copy with every descendant anchor matching the predicate removed,
    /// together with its content.
    pub fn without_anchors<P>(&self, predicate: P) -> Element
    where
        P: Fn(&Element) -> bool,
    {
        prune(self, &|element: &Element| element.is("a") && predicate(element))
    }
}

fn collect_text(element: &Element, out: &mut String) {
    for child in &element.children {
        match child {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(el, out),
        }
    }
}

fn collect_descendants<'a>(element: &'a Element, out: &mut Vec<&'a Element>) {
    for child in element.child_elements() {
        out.push(child);
        collect_descendants(child, out);
    }
}

fn find_with_chain<'a, P>(
    element: &'a Element,
    predicate: &P,
    chain: &mut Vec<&'a Element>,
) -> Option<(&'a Element, Vec<&'a Element>)>
where
    P: Fn(&Element) -> bool,
{
    for child in element.child_elements() {
        if predicate(child) {
            return Some((child, chain.clone()));
        }
        chain.push(child);
        if let Some(found) = find_with_chain(child, predicate, chain) {
            return Some(found);
        }
        chain.pop();
    }
    None
}

fn prune(element: &Element, remove: &dyn Fn(&Element) -> bool) -> Element {
    let children = element
        .children
        .iter()
        .filter_map(|child| match child {
            Node::Element(el) if remove(el) => None,
            Node::Element(el) => Some(Node::Element(prune(el, remove))),
            Node::Text(text) => Some(Node::Text(text.clone())),
        })
        .collect();
    Element {
        tag: element.tag.clone(),
        attrs: element.attrs.clone(),
        children,
    }
}
