//! Column width analysis over CSV lines.

use super::fixed_width::display_cell;
use super::{fitted_cells, split_fields, RenderOptions, DISPLAY_SEPARATOR};
use crate::core::Result;

/// Maximum display width per column, header included, indexed from 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ColumnWidthTable {
    widths: Vec<usize>,
}

impl ColumnWidthTable {
    pub fn from_widths(widths: Vec<usize>) -> Self {
        ColumnWidthTable { widths }
    }

    /// Width of column `column`, if the header has that many columns.
    pub fn get(&self, column: usize) -> Option<usize> {
        self.widths.get(column).copied()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.widths
    }

    /// Builds the left-justify templates for these widths.
    pub fn format_spec(&self) -> FormatSpec {
        FormatSpec {
            columns: self
                .widths
                .iter()
                .map(|&width| ColumnFormat { width })
                .collect(),
        }
    }
}

/// Left-justify template for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnFormat {
    pub width: usize,
}

impl ColumnFormat {
    /// Pads `value` to the column width and appends the display separator.
    ///
    /// Values wider than the column are written in full.
    pub fn apply(&self, value: &str, out: &mut String) {
        out.push_str(&format!("{:<width$}", value, width = self.width));
        out.push_str(DISPLAY_SEPARATOR);
    }
}

/// One `ColumnFormat` per column, derived from a `ColumnWidthTable`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    columns: Vec<ColumnFormat>,
}

impl FormatSpec {
    pub fn column(&self, column: usize) -> Option<&ColumnFormat> {
        self.columns.get(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// Computes the widest display form of every column.
///
/// The header's cell count fixes the number of columns. Other lines are fitted
/// to it according to `opts.malformed_rows`, so a rejected line surfaces here
/// before anything is rendered. Widths count Unicode scalar values of the
/// displayed text (`null` for empty cells, commas restored, pipes escaped).
pub fn analyze_widths<S: AsRef<str>>(
    lines: &[S],
    opts: &RenderOptions,
) -> Result<ColumnWidthTable> {
    let Some(header) = lines.first() else {
        return Ok(ColumnWidthTable::default());
    };
    let column_count = split_fields(header.as_ref()).count();
    let mut widths = vec![0usize; column_count];

    for (line_no, line) in lines.iter().enumerate() {
        let cells = fitted_cells(line_no, line.as_ref(), column_count, opts.malformed_rows)?;
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(display_cell(cell).chars().count());
        }
    }

    Ok(ColumnWidthTable { widths })
}
