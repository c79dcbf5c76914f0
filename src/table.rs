//! Fixed-width console table for rendered grid cells.

use crate::grid::RenderedCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot<'a> {
    Empty,
    Start { value: &'a str, colspan: usize },
    /// Lower part of a cell spanning several rows.
    Continued { colspan: usize },
    /// Right part of a cell spanning several columns.
    Covered,
}

/// Draw rendered rows as an ASCII table.
///
/// ```text
/// +-----+-----+
/// | Foo | Bar |
/// | 1   | 2   |
/// +-----+-----+
/// ```
///
/// There are no separators between rows so that row spans stay readable.
/// Returns an empty string when there is nothing to draw.
pub fn draw(rows: &[Vec<RenderedCell>]) -> String {
    let column_count = rows
        .iter()
        .flatten()
        .map(|cell| cell.column + cell.colspan.max(1))
        .max()
        .unwrap_or(0);

    if column_count == 0 {
        return String::new();
    }

    let widths = column_widths(rows, column_count);
    let grid = layout(rows, column_count);
    let border = border_line(&widths);

    let mut output = String::new();
    output.push_str(&border);
    for slots in &grid {
        output.push_str(&row_line(slots, &widths));
    }
    output.push_str(&border);
    output
}

fn display_value(value: &str) -> String {
    value.replace(['\r', '\n'], " ")
}

fn text_width(value: &str) -> usize {
    display_value(value).chars().count()
}

/// Width available to a cell starting at `column` and spanning `colspan`
/// columns, inner separators included.
fn span_width(widths: &[usize], column: usize, colspan: usize) -> usize {
    let end = (column + colspan).min(widths.len());
    let spanned = &widths[column..end];
    spanned.iter().sum::<usize>() + 3 * spanned.len().saturating_sub(1)
}

fn column_widths(rows: &[Vec<RenderedCell>], column_count: usize) -> Vec<usize> {
    let mut widths = vec![0; column_count];

    for cell in rows.iter().flatten().filter(|cell| cell.colspan <= 1) {
        widths[cell.column] = widths[cell.column].max(text_width(&cell.value));
    }

    let mut spanning: Vec<&RenderedCell> =
        rows.iter().flatten().filter(|cell| cell.colspan > 1).collect();
    spanning.sort_by_key(|cell| cell.colspan);

    for cell in spanning {
        let available = span_width(&widths, cell.column, cell.colspan);
        let needed = text_width(&cell.value);
        if needed > available {
            let last = (cell.column + cell.colspan).min(column_count) - 1;
            widths[last] += needed - available;
        }
    }

    widths
}

fn layout(rows: &[Vec<RenderedCell>], column_count: usize) -> Vec<Vec<Slot<'_>>> {
    let mut layout = vec![vec![Slot::Empty; column_count]; rows.len()];

    for cell in rows.iter().flatten() {
        let colspan = cell.colspan.max(1);
        let row_end = (cell.row + cell.rowspan.max(1)).min(rows.len());
        let column_end = (cell.column + colspan).min(column_count);

        for row in cell.row..row_end {
            for column in cell.column..column_end {
                layout[row][column] = if column != cell.column {
                    Slot::Covered
                } else if row == cell.row {
                    Slot::Start {
                        value: &cell.value,
                        colspan,
                    }
                } else {
                    Slot::Continued { colspan }
                };
            }
        }
    }

    layout
}

fn border_line(widths: &[usize]) -> String {
    let mut line = String::from("+");
    for width in widths {
        line.push_str(&"-".repeat(width + 2));
        line.push('+');
    }
    line.push('\n');
    line
}

fn row_line(slots: &[Slot<'_>], widths: &[usize]) -> String {
    let mut line = String::from("|");
    let mut column = 0;

    while column < slots.len() {
        let (text, colspan) = match slots[column] {
            Slot::Start { value, colspan } => (display_value(value), colspan),
            Slot::Continued { colspan } => (String::new(), colspan),
            Slot::Empty | Slot::Covered => (String::new(), 1),
        };
        let width = span_width(widths, column, colspan);
        line.push_str(&format!(" {:<width$} |", text, width = width));
        column += colspan;
    }

    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: usize, column: usize, value: &str, colspan: usize, rowspan: usize) -> RenderedCell {
        RenderedCell {
            row,
            column,
            value: value.to_string(),
            colspan,
            rowspan,
        }
    }

    #[test]
    fn test_draw_empty() {
        assert_eq!(draw(&[]), "");
        assert_eq!(draw(&[vec![]]), "");
    }

    #[test]
    fn test_draw_plain_grid() {
        let rows = vec![
            vec![cell(0, 0, "Foo", 1, 1), cell(0, 1, "Bar", 1, 1)],
            vec![cell(1, 0, "1", 1, 1), cell(1, 1, "22", 1, 1)],
        ];

        let expected = "\
+-----+-----+
| Foo | Bar |
| 1   | 22  |
+-----+-----+
";
        assert_eq!(draw(&rows), expected);
    }

    #[test]
    fn test_draw_colspan_widens_last_column() {
        let rows = vec![
            vec![cell(0, 0, "Wide header", 2, 1)],
            vec![cell(1, 0, "a", 1, 1), cell(1, 1, "b", 1, 1)],
        ];

        let expected = "\
+---+---------+
| Wide header |
| a | b       |
+---+---------+
";
        assert_eq!(draw(&rows), expected);
    }

    #[test]
    fn test_draw_rowspan_leaves_blank_below() {
        let rows = vec![
            vec![cell(0, 0, "Tall", 1, 2), cell(0, 1, "x", 1, 1)],
            vec![cell(1, 1, "y", 1, 1)],
        ];

        let expected = "\
+------+---+
| Tall | x |
|      | y |
+------+---+
";
        assert_eq!(draw(&rows), expected);
    }

    #[test]
    fn test_draw_short_row_is_padded() {
        let rows = vec![
            vec![cell(0, 0, "a", 1, 1), cell(0, 1, "b", 1, 1)],
            vec![cell(1, 0, "c", 1, 1)],
        ];

        let expected = "\
+---+---+
| a | b |
| c |   |
+---+---+
";
        assert_eq!(draw(&rows), expected);
    }

    #[test]
    fn test_draw_unicode_width() {
        let rows = vec![vec![cell(0, 0, "забег", 1, 1)], vec![cell(1, 0, "ab", 1, 1)]];

        let expected = "\
+-------+
| забег |
| ab    |
+-------+
";
        assert_eq!(draw(&rows), expected);
    }
}
