//! Import tests for HTML format (HTML → source tree)

use quill_babel::dom::Node;
use quill_babel::formats::html::parse_from_html;
use quill_babel::{FormatError, FormatRegistry};

fn tags(nodes: &[Node]) -> Vec<&str> {
    nodes
        .iter()
        .filter_map(Node::as_element)
        .map(|e| e.tag.as_str())
        .collect()
}

#[test]
fn test_fragment_becomes_body_children() {
    let doc = parse_from_html("<h1>Title</h1><p>Body</p>").unwrap();
    assert_eq!(doc.body.tag, "body");
    assert_eq!(tags(&doc.body.children), vec!["h1", "p"]);
}

#[test]
fn test_head_content_is_not_part_of_the_body() {
    let doc = parse_from_html(
        "<html><head><title>T</title><style>p{}</style></head><body><p>B</p></body></html>",
    )
    .unwrap();
    assert_eq!(tags(&doc.body.children), vec!["p"]);
    assert_eq!(doc.body.text_content(), "B");
}

#[test]
fn test_parser_inserts_implied_table_sections() {
    let doc = parse_from_html("<table><tr><td>x</td></tr></table>").unwrap();
    let table = doc.body.first_element_child().unwrap();
    assert_eq!(table.tag, "table");
    assert_eq!(tags(&table.children), vec!["tbody"]);
}

#[test]
fn test_entities_are_decoded() {
    let doc = parse_from_html("<p>a &amp; b&nbsp;c &lt;d&gt;</p>").unwrap();
    assert_eq!(doc.body.text_content(), "a & b\u{a0}c <d>");
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let doc = parse_from_html(r#"<P CLASS="Lead" Data-List="bullet">x</P>"#).unwrap();
    let p = doc.body.first_element_child().unwrap();
    assert_eq!(p.tag, "p");
    assert_eq!(p.attr("class"), Some("Lead"));
    assert_eq!(p.attr("data-list"), Some("bullet"));
}

#[test]
fn test_unclosed_markup_is_repaired() {
    let doc = parse_from_html("<ul><li>one<li>two</ul><p>after").unwrap();
    let list = doc.body.first_element_child().unwrap();
    assert_eq!(tags(&list.children), vec!["li", "li"]);
    assert_eq!(tags(&doc.body.children), vec!["ul", "p"]);
}

#[test]
fn test_html_format_in_registry() {
    let registry = FormatRegistry::default();
    assert_eq!(
        registry.detect_format_from_filename("notes.htm"),
        Some("html".to_string())
    );

    let doc = registry.parse("<p>x</p>", "html").unwrap();
    assert!(matches!(
        registry.serialize(&doc, "html"),
        Err(FormatError::NotSupported(_))
    ));
}
