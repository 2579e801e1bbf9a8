//! Output invariants over generated editor HTML.

use proptest::prelude::*;
use quill_babel::formats::markdown::footnotes::normalize_label;
use quill_babel::formats::markdown::normalize::{
    collapse_blank_lines, normalize, strip_trailing_whitespace,
};
use quill_babel::html_to_markdown;
use std::collections::HashSet;

fn leaf() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z \t]{0,8}",
        Just("<br>".to_string()),
        Just("<hr>".to_string()),
        Just("&nbsp;".to_string()),
        "(i|ii|iv|[0-9]{1,2})".prop_map(|label| format!("<sup>{label}</sup>")),
        "[0-9]{1,2}".prop_map(|n| format!(r##"<a href="#fn{n}">{n}</a>"##)),
        "[0-9]".prop_map(|n| format!(r##"<p><a name="_ftn{n}" href="#_ftnref{n}">[{n}]</a> note {n}</p>"##)),
        "[a-z`]{1,6}".prop_map(|code| format!("<code>{code}</code>")),
    ]
}

fn editor_html() -> impl Strategy<Value = String> {
    leaf().prop_recursive(4, 48, 4, |inner| {
        let tags = prop::sample::select(vec![
            "p",
            "h2",
            "div",
            "ul",
            "ol",
            "li",
            "blockquote",
            "strong",
            "em",
            "pre",
            "table",
            "tr",
            "td",
            "th",
            "section class=\"footnotes\"",
        ]);
        (tags, prop::collection::vec(inner, 0..4)).prop_map(|(tag, children)| {
            let name = tag.split(' ').next().unwrap_or(tag);
            format!("<{tag}>{}</{name}>", children.concat())
        })
    })
}

fn definition_labels(markdown: &str) -> Vec<&str> {
    markdown
        .lines()
        .filter_map(|line| line.strip_prefix("[^"))
        .filter_map(|rest| rest.split_once("]:"))
        .map(|(label, _)| label)
        .collect()
}

#[test]
fn test_definition_labels_helper() {
    let md = "Body[^1]\n\n[^1]: One\n[^a]: Two\n";
    assert_eq!(definition_labels(md), vec!["1", "a"]);
}

proptest! {
    #[test]
    fn prop_output_shape(html in editor_html()) {
        let md = html_to_markdown(&html).unwrap();

        prop_assert!(md.ends_with('\n'));
        prop_assert!(!md.ends_with("\n\n"));
        prop_assert!(!md.contains("\n\n\n"), "{:?}", md);
        for line in md.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
    }

    #[test]
    fn prop_output_is_normalized(html in editor_html()) {
        let md = html_to_markdown(&html).unwrap();
        prop_assert_eq!(normalize(&md), md);
    }

    #[test]
    fn prop_one_definition_per_label(labels in prop::collection::vec("(i|ii|iv|1|2|4|a)", 1..8)) {
        let items: String = labels
            .iter()
            .map(|label| format!(r#"<li data-footnote-label="{label}">note {label}</li>"#))
            .collect();
        let md = html_to_markdown(&format!(r#"<section class="footnotes"><ol>{items}</ol></section>"#)).unwrap();

        let expected: HashSet<String> = labels.iter().map(|label| normalize_label(label)).collect();
        let found = definition_labels(&md);
        prop_assert_eq!(found.len(), expected.len(), "{:?}", md);
        let found: HashSet<String> = found.into_iter().map(str::to_string).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn prop_normalize_is_idempotent(text in "[a-z \t\n]{0,40}") {
        let once = normalize(&text);
        prop_assert_eq!(normalize(&once), once.clone());
        prop_assert_eq!(collapse_blank_lines(&once), once.clone());
        prop_assert_eq!(strip_trailing_whitespace(&once), once);
    }
}
