//! Pipe-table rendering.

use super::context::{SerializationContext, SerializerState};
use super::serializer::serialize_children;
use crate::dom::Element;

const MIN_COLUMN_WIDTH: usize = 3;

/// Render a table as a padded pipe table, without trailing newline.
///
/// Rows are every `<tr>` below the table in document order, whatever section wraps them.
/// The first row containing a `<th>` is the header; without one the first row is promoted.
/// Cells are always rendered as inline content with footnote capture suppressed.
pub fn render_table(
    table: &Element,
    ctx: SerializationContext,
    state: &mut SerializerState,
) -> String {
    let rows: Vec<&Element> = table
        .descendants()
        .into_iter()
        .filter(|e| e.is("tr"))
        .collect();
    if rows.is_empty() {
        return String::new();
    }

    let cell_ctx = ctx
        .with_inline(true)
        .with_depth(ctx.depth() + 1)
        .with_capture_disabled();

    let mut matrix: Vec<Vec<String>> = Vec::with_capacity(rows.len());
    for row in &rows {
        let row_ctx = cell_ctx.descend(row);
        let mut cells = Vec::new();
        for cell in row
            .child_elements()
            .filter(|cell| cell.is("th") || cell.is("td"))
        {
            let text = serialize_children(cell, row_ctx.descend(cell), state);
            cells.push(text.trim().to_string());
        }
        matrix.push(cells);
    }

    let header_index = rows
        .iter()
        .position(|row| row.find_descendant(|e| e.is("th")).is_some())
        .unwrap_or(0);
    let mut header = matrix.remove(header_index);
    let mut body = matrix;

    let columns = body
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return String::new();
    }

    header.resize(columns, String::new());
    for row in &mut body {
        row.resize(columns, String::new());
    }

    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(MIN_COLUMN_WIDTH)
        })
        .collect();

    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.push(format_row(&header, &widths));
    let divider: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    lines.push(format_row(&divider, &widths));
    for row in &body {
        lines.push(format_row(row, &widths));
    }
    lines.join("\n")
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    format!("| {} |", padded.join(" | "))
}
