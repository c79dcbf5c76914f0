//! Merge-aware layout of a spreadsheet grid.
//!
//! [`render`] turns a grid of formatted cell values and the sheet's merge
//! list into rows of cells annotated with their spans. Cells hidden under a
//! merged region are left out; only the region's top-left cell is kept.

use crate::models::{GridRange, Sheet};

/// A rectangle of merged cells. End indexes are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeRegion {
    pub start_row: usize,
    pub start_column: usize,
    pub end_row: usize,
    pub end_column: usize,
}

impl MergeRegion {
    pub fn new(start_row: usize, start_column: usize, end_row: usize, end_column: usize) -> Self {
        Self {
            start_row,
            start_column,
            end_row,
            end_column,
        }
    }

    /// Whether the cell at `(row, column)` lies inside the region.
    pub fn contains(&self, row: usize, column: usize) -> bool {
        row >= self.start_row
            && row < self.end_row
            && column >= self.start_column
            && column < self.end_column
    }

    /// Whether `(row, column)` is the top-left cell of the region.
    pub fn is_origin(&self, row: usize, column: usize) -> bool {
        row == self.start_row && column == self.start_column
    }
}

impl From<&GridRange> for MergeRegion {
    fn from(range: &GridRange) -> Self {
        Self::new(
            range.start_row_index,
            range.start_column_index,
            range.end_row_index,
            range.end_column_index,
        )
    }
}

/// A displayable cell value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridCell {
    pub value: String,
}

impl GridCell {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A visible cell with its position in the source grid and its spans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedCell {
    pub row: usize,
    pub column: usize,
    pub value: String,
    pub colspan: usize,
    pub rowspan: usize,
}

/// Lay out `rows`, giving merge origins their spans and dropping the cells
/// they cover.
///
/// Every input row yields an output row, even when all of its cells are
/// covered. Overlapping merges are not checked.
pub fn render(rows: &[Vec<GridCell>], merges: &[MergeRegion]) -> Vec<Vec<RenderedCell>> {
    rows.iter()
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(|(column, cell)| render_cell(row, column, cell, merges))
                .collect()
        })
        .collect()
}

fn render_cell(
    row: usize,
    column: usize,
    cell: &GridCell,
    merges: &[MergeRegion],
) -> Option<RenderedCell> {
    let (colspan, rowspan) = match merges.iter().find(|merge| merge.contains(row, column)) {
        None => (1, 1),
        Some(merge) if merge.is_origin(row, column) => (
            merge.end_column - merge.start_column,
            merge.end_row - merge.start_row,
        ),
        // Covered by the origin cell's span
        Some(_) => return None,
    };

    Some(RenderedCell {
        row,
        column,
        value: cell.value.clone(),
        colspan,
        rowspan,
    })
}

/// Cell values and merges of the first data block of a sheet.
pub fn sheet_grid(sheet: &Sheet) -> (Vec<Vec<GridCell>>, Vec<MergeRegion>) {
    let rows: Vec<Vec<GridCell>> = sheet
        .data
        .first()
        .map(|data| {
            data.row_data
                .iter()
                .map(|row| {
                    row.values
                        .iter()
                        .map(|cell| GridCell::new(cell.formatted_value.clone().unwrap_or_default()))
                        .collect()
                })
                .collect()
        })
        .unwrap_or_default();
    let merges = sheet.merges.iter().map(MergeRegion::from).collect();

    (rows, merges)
}
