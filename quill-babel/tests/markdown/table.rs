//! Table tests (HTML → Markdown)

use super::to_markdown;

#[test]
fn test_header_and_body() {
    assert_eq!(
        to_markdown("<table><tr><th>A</th><th>B</th></tr><tr><td>1</td><td>22</td></tr></table>"),
        "| A   | B   |\n| --- | --- |\n| 1   | 22  |\n"
    );
}

#[test]
fn test_first_row_is_promoted_without_header_cells() {
    assert_eq!(
        to_markdown("<table><tr><td>x</td><td>y</td></tr><tr><td>1</td><td>2</td></tr></table>"),
        "| x   | y   |\n| --- | --- |\n| 1   | 2   |\n"
    );
}

#[test]
fn test_header_row_need_not_come_first() {
    assert_eq!(
        to_markdown("<table><tr><td>pre</td></tr><tr><th>H1</th><th>H2</th></tr></table>"),
        "| H1  | H2  |\n| --- | --- |\n| pre |     |\n"
    );
}

#[test]
fn test_short_rows_are_padded() {
    let html = concat!(
        "<table>",
        "<thead><tr><th>Name</th></tr></thead>",
        "<tbody><tr><td>a</td><td>b</td><td>c</td></tr></tbody>",
        "</table>"
    );
    assert_eq!(
        to_markdown(html),
        "| Name |     |     |\n| ---- | --- | --- |\n| a    | b   | c   |\n"
    );
}

#[test]
fn test_width_counts_characters() {
    assert_eq!(
        to_markdown("<table><tr><th>ü</th><th>日本語です</th></tr></table>"),
        "| ü   | 日本語です |\n| --- | ----- |\n"
    );
}

#[test]
fn test_empty_table_renders_nothing() {
    assert_eq!(to_markdown("<p>a</p><table></table><p>b</p>"), "a\n\nb\n");
    assert_eq!(to_markdown("<table><tr></tr></table><p>b</p>"), "b\n");
}

#[test]
fn test_block_content_is_flattened() {
    assert_eq!(
        to_markdown("<table><tr><td><p>Para</p></td><td><ul><li>item</li></ul></td></tr></table>"),
        "| Para | - item |\n| ---- | ------ |\n"
    );
}

#[test]
fn test_cells_never_capture_definitions() {
    let html = r##"<table><tr><td><p><a name="_ftn1" href="#_ftnref1">[1]</a> cell note</p></td></tr></table>"##;
    assert_eq!(
        to_markdown(html),
        "| [^1] cell note |\n| -------------- |\n"
    );
}

#[test]
fn test_table_is_followed_by_a_blank_line() {
    assert_eq!(
        to_markdown("<table><tr><th>A</th></tr></table><p>after</p>"),
        "| A   |\n| --- |\n\nafter\n"
    );
}
