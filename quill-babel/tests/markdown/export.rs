//! Export tests for Markdown format (HTML → Markdown)
//!
//! Element-by-element checks of the serializer output, plus a kitchensink document
//! shaped like real editor content.

use super::to_markdown;
use insta::assert_snapshot;
use quill_babel::format::Format;
use quill_babel::formats::markdown::MarkdownFormat;
use quill_babel::{FormatError, FormatRegistry};
use std::collections::HashMap;

// ============================================================================
// BLOCK ELEMENTS
// ============================================================================

#[test]
fn test_heading_levels() {
    assert_eq!(
        to_markdown("<h1>One</h1><h2>Two</h2><h6>Six</h6>"),
        "# One\n\n## Two\n\n###### Six\n"
    );
}

#[test]
fn test_empty_heading_is_dropped() {
    assert_eq!(to_markdown("<h2>  </h2><p>Body</p>"), "Body\n");
}

#[test]
fn test_empty_paragraph_contributes_nothing() {
    assert_eq!(to_markdown("<p>a</p><p></p><p> </p><p>b</p>"), "a\n\nb\n");
    assert_eq!(to_markdown("<p><br></p>"), "\n");
}

#[test]
fn test_paragraph_whitespace_collapses() {
    assert_eq!(
        to_markdown("<p>  spaced \n\n out&nbsp;&nbsp;text  </p>"),
        "spaced out text\n"
    );
}

#[test]
fn test_line_break_in_block_context() {
    assert_eq!(to_markdown("<div>a<br>b</div>"), "a\nb\n");
}

#[test]
fn test_blockquote_multiline() {
    assert_eq!(
        to_markdown("<blockquote><p>First</p><p>Second</p></blockquote><p>After</p>"),
        "> First\n>\n> Second\n\nAfter\n"
    );
    assert_eq!(to_markdown("<blockquote> </blockquote>"), "\n");
}

#[test]
fn test_horizontal_rule() {
    assert_eq!(to_markdown("<p>a</p><hr><p>b</p>"), "a\n\n---\n\nb\n");
}

#[test]
fn test_code_block_language_sources() {
    assert_eq!(
        to_markdown(r#"<pre><code class="hljs language-python">print(1)</code></pre>"#),
        "```python\nprint(1)\n```\n"
    );
    assert_eq!(
        to_markdown(r#"<pre lang="sh">ls -la</pre>"#),
        "```sh\nls -la\n```\n"
    );
    assert_eq!(
        to_markdown("<pre>a\r\nb   \n\n</pre>"),
        "```\na\nb\n```\n"
    );
}

#[test]
fn test_code_block_fence_outgrows_content() {
    let html = "<pre><code>```js\nlet a = 1;\n```</code></pre>";
    assert_eq!(to_markdown(html), "````\n```js\nlet a = 1;\n```\n````\n");
}

#[test]
fn test_container_and_block_fallbacks() {
    assert_eq!(
        to_markdown("<div><p>In div</p></div><article><p>In article</p></article>"),
        "In div\n\nIn article\n"
    );
    assert_eq!(to_markdown("<figure><figcaption>Cap</figcaption></figure>"), "Cap\n");
}

#[test]
fn test_non_content_elements() {
    assert_eq!(
        to_markdown("<p>Visible</p><template><p>Hidden</p></template><script>x()</script>"),
        "Visible\n"
    );
}

// ============================================================================
// INLINE ELEMENTS
// ============================================================================

#[test]
fn test_emphasis_family() {
    assert_eq!(
        to_markdown("<p><b>b</b> <strong>s</strong> <i>i</i> <em>e</em> <del>d</del> <strike>k</strike></p>"),
        "**b** **s** *i* *e* ~~d~~ ~~k~~\n"
    );
}

#[test]
fn test_empty_marks_are_dropped() {
    assert_eq!(to_markdown("<p>a<strong></strong><em></em><s></s>b</p>"), "ab\n");
}

#[test]
fn test_inline_code_fence_grows_with_backticks() {
    assert_eq!(to_markdown("<p><code>plain</code></p>"), "`plain`\n");
    assert_eq!(to_markdown("<p><code>a`b</code></p>"), "``a`b``\n");
    assert_eq!(to_markdown("<p><code>a``b`c</code></p>"), "```a``b`c```\n");
}

#[test]
fn test_inline_code_is_raw() {
    assert_eq!(
        to_markdown("<p><code><b>not</b> bold</code></p>"),
        "`not bold`\n"
    );
}

#[test]
fn test_links() {
    assert_eq!(
        to_markdown(r#"<p><a href="https://example.com">Example</a></p>"#),
        "[Example](https://example.com)\n"
    );
    assert_eq!(
        to_markdown(r#"<p><a href="https://example.com" title="The &quot;site&quot;">x</a></p>"#),
        "[x](https://example.com \"The \\\"site\\\"\")\n"
    );
    assert_eq!(
        to_markdown(r#"<p><a href="/path">a [b] c\d</a></p>"#),
        "[a \\[b\\] c\\\\d](/path)\n"
    );
}

#[test]
fn test_link_fallbacks() {
    assert_eq!(
        to_markdown(r#"<p><a href="https://example.com"></a></p>"#),
        "[https://example.com](https://example.com)\n"
    );
    assert_eq!(to_markdown("<p><a>no target</a></p>"), "no target\n");
}

#[test]
fn test_in_page_links_stay_links() {
    assert_eq!(
        to_markdown(r##"<p><a href="#install">Install</a></p>"##),
        "[Install](#install)\n"
    );
}

#[test]
fn test_images() {
    assert_eq!(
        to_markdown(r#"<p><img src="cat.png" alt="A cat"></p>"#),
        "![A cat](cat.png)\n"
    );
    assert_eq!(
        to_markdown(r#"<p><img src="cat.png" alt="" title="Say &quot;hi&quot;"></p>"#),
        "![](cat.png \"Say \\\"hi\\\"\")\n"
    );
    assert_eq!(to_markdown(r#"<p>a<img alt="missing">b</p>"#), "ab\n");
}

#[test]
fn test_unrecognized_inline_tags_are_transparent() {
    assert_eq!(
        to_markdown("<p><span class=\"ql-size-large\">big <u>under</u></span> text</p>"),
        "big under text\n"
    );
}

#[test]
fn test_superscript_without_footnotes() {
    let options = quill_babel::MarkdownOptions {
        footnotes: false,
        ..Default::default()
    };
    assert_eq!(
        quill_babel::html_to_markdown_with_options("<p>x<sup>2</sup></p>", &options).unwrap(),
        "x^2^\n"
    );
}

// ============================================================================
// OUTPUT SHAPE
// ============================================================================

#[test]
fn test_output_ends_with_single_newline() {
    for html in ["", "<p>a</p>", "<h1>t</h1><hr>", "<ul><li>x</li></ul>"] {
        let md = to_markdown(html);
        assert!(md.ends_with('\n'), "{md:?}");
        assert!(!md.ends_with("\n\n"), "{md:?}");
    }
}

#[test]
fn test_no_runs_of_blank_lines() {
    let md = to_markdown("<p>a</p><div><div><p>b</p></div></div><br><br><br><p>c</p>");
    assert!(!md.contains("\n\n\n"), "{md:?}");
    assert_eq!(md, "a\n\nb\n\nc\n");
}

// ============================================================================
// FORMAT AND PARAMETERS
// ============================================================================

#[test]
fn test_format_through_registry() {
    let registry = FormatRegistry::default();
    let doc = registry.parse("<p><em>hi</em></p>", "html").unwrap();
    assert_eq!(registry.serialize(&doc, "markdown").unwrap(), "*hi*\n");
}

#[test]
fn test_format_parameters() {
    let registry = FormatRegistry::default();
    let doc = registry
        .parse("<div><div><div><p>deep</p></div></div></div><p>top</p>", "html")
        .unwrap();

    let mut params = HashMap::new();
    params.insert("max-depth".to_string(), "2".to_string());
    assert_eq!(
        MarkdownFormat.serialize_with_options(&doc, &params),
        Err(FormatError::RecursionLimitExceeded { limit: 2 })
    );

    params.insert("max-depth".to_string(), "10".to_string());
    assert_eq!(
        MarkdownFormat.serialize_with_options(&doc, &params).unwrap(),
        "deep\n\ntop\n"
    );

    params.insert("max-depth".to_string(), "ten".to_string());
    assert!(matches!(
        MarkdownFormat.serialize_with_options(&doc, &params),
        Err(FormatError::InvalidParameter { .. })
    ));
}

#[test]
fn test_best_effort_conversion_keeps_shallow_content() {
    let doc = quill_babel::formats::html::parse_from_html(
        "<div><div><div><p>deep</p></div></div></div><p>top</p>",
    )
    .unwrap();
    let serializer = quill_babel::MarkdownSerializer::new(quill_babel::MarkdownOptions {
        max_depth: 2,
        ..Default::default()
    });

    let conversion = serializer.convert(&doc);
    assert_eq!(conversion.markdown, "top\n");
    assert_eq!(conversion.errors.len(), 1);
}

#[test]
fn test_runaway_nesting_converts_best_effort() {
    let levels = 20_000;
    let html = format!(
        "<h2>Title</h2>{}lost{}<p>tail</p>",
        "<div>".repeat(levels),
        "</div>".repeat(levels)
    );

    let conversion =
        quill_babel::convert_html(&html, &quill_babel::MarkdownOptions::default()).unwrap();
    assert_eq!(conversion.markdown, "## Title\n\ntail\n");
    assert_eq!(
        conversion.errors,
        vec![FormatError::RecursionLimitExceeded { limit: 256 }]
    );

    assert_eq!(
        quill_babel::html_to_markdown(&html),
        Err(FormatError::RecursionLimitExceeded { limit: 256 })
    );
}

// ============================================================================
// KITCHENSINK
// ============================================================================

#[test]
fn test_kitchensink() {
    let html = include_str!("fixtures/kitchensink.html");
    let md = to_markdown(html);

    assert_snapshot!(md, @r#"
# Field notes

Quill keeps **bold**, *italic* and ~~struck~~ text, plus `inline code`.

1. First step
2. Second step
  - A detail
- [x] Done
- [ ] Open

> Quoted line

```rust
fn main() {
    println!("hi");
}
```

See [the editor](https://quilljs.com "Quill").[^1] Also a Word note[^2].

| Name   | Count |
| ------ | ----- |
| apples | 3     |
| pears  |       |

---

[^1]: Quill is a rich-text editor.
[^2]: A word-processor note.
"#);
}
