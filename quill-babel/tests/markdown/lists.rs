//! List tests (HTML → Markdown)

use super::to_markdown;

#[test]
fn test_bullet_list() {
    assert_eq!(
        to_markdown("<ul><li>One</li><li>Two</li></ul>"),
        "- One\n- Two\n"
    );
}

#[test]
fn test_ordered_list() {
    assert_eq!(
        to_markdown("<ol><li>One</li><li>Two</li><li>Three</li></ol>"),
        "1. One\n2. Two\n3. Three\n"
    );
}

#[test]
fn test_nested_list() {
    assert_eq!(
        to_markdown("<ul><li>One<ul><li>Two</li></ul></li></ul>"),
        "- One\n  - Two\n"
    );
    assert_eq!(
        to_markdown("<ol><li>a<ol><li>x</li><li>y</li></ol></li><li>b</li></ol>"),
        "1. a\n  1. x\n  2. y\n2. b\n"
    );
}

#[test]
fn test_item_hints_override_the_list_tag() {
    assert_eq!(
        to_markdown(
            r#"<ol><li data-list="ordered">a</li><li data-list="bullet">b</li><li data-list="ordered">c</li></ol>"#
        ),
        "1. a\n- b\n2. c\n"
    );
}

#[test]
fn test_task_items() {
    assert_eq!(
        to_markdown(
            r#"<ul><li data-list="checked">done</li><li data-list="unchecked"></li></ul>"#
        ),
        "- [x] done\n- [ ]\n"
    );
}

#[test]
fn test_empty_items_are_skipped() {
    assert_eq!(
        to_markdown("<ul><li>a</li><li> </li><li><br></li><li>b</li></ul>"),
        "- a\n- b\n"
    );
    assert_eq!(to_markdown("<ul><li></li></ul><p>x</p>"), "x\n");
}

#[test]
fn test_multi_paragraph_item_aligns_under_marker() {
    assert_eq!(
        to_markdown("<ol><li><p>First</p><p>Second</p></li></ol>"),
        "1. First\n\n   Second\n"
    );
    assert_eq!(
        to_markdown("<ul><li><p>First</p><p>Second</p></li></ul>"),
        "- First\n\n  Second\n"
    );
}

#[test]
fn test_editor_indent_classes() {
    let html = concat!(
        "<ol>",
        "<li>one</li>",
        r#"<li class="ql-indent-1">sub a</li>"#,
        r#"<li class="ql-indent-1">sub b</li>"#,
        "<li>two</li>",
        r#"<li class="ql-indent-1">sub c</li>"#,
        "</ol>"
    );
    assert_eq!(
        to_markdown(html),
        "1. one\n  1. sub a\n  2. sub b\n2. two\n  1. sub c\n"
    );
}

#[test]
fn test_oversized_indent_classes_are_clamped() {
    let clamped = to_markdown(r#"<ol><li>top</li><li class="ql-indent-8">x</li></ol>"#);
    assert_eq!(clamped, format!("1. top\n{}1. x\n", " ".repeat(16)));

    for level in ["9", "100000000", "18446744073709551615"] {
        let html = format!(r#"<ol><li>top</li><li class="ql-indent-{level}">x</li></ol>"#);
        assert_eq!(to_markdown(&html), clamped, "ql-indent-{level}");
    }
}

#[test]
fn test_item_with_only_a_nested_list() {
    assert_eq!(
        to_markdown("<p>Intro</p><ul><li><ul><li>deep</li></ul></li><li>next</li></ul>"),
        "Intro\n\n  - deep\n- next\n"
    );
}

#[test]
fn test_lists_are_separated_from_what_follows() {
    assert_eq!(
        to_markdown("<ul><li>a</li></ul><ul><li>b</li></ul><p>after</p>"),
        "- a\n\n- b\n\nafter\n"
    );
}

#[test]
fn test_inline_marks_inside_items() {
    assert_eq!(
        to_markdown(r#"<ul><li><b>bold</b> and <a href="/x">link</a></li></ul>"#),
        "- **bold** and [link](/x)\n"
    );
}

#[test]
fn test_loose_item_outside_a_list() {
    assert_eq!(to_markdown("<li>Loose <b>item</b></li>"), "Loose **item**\n");
}

#[test]
fn test_note_item_becomes_a_definition() {
    let html = concat!(
        r##"<p>Claim<a href="#_edn1" name="_ednref1">[i]</a></p>"##,
        r##"<ol><li><a href="#_ednref1" name="_edn1">[i]</a> Source</li><li>Kept item</li></ol>"##
    );
    assert_eq!(
        to_markdown(html),
        "Claim[^1]\n\n1. Kept item\n\n[^1]: Source\n"
    );
}
