//! Text rendering of tabular query results.
//!
//! The pipeline runs in one direction:
//! 1. `TabularResult` (columns + nullable cells)
//! 2. CSV lines (`csv`), commas inside values rewritten to `_COMMA_`
//! 3. per-column widths (`widths`) measured over every CSV line
//! 4. fixed-width lines (`fixed_width`), padded and joined with ` | `
//!
//! Every stage is a pure function of its input; nothing is cached between calls.

pub mod csv;
pub mod fixed_width;
pub mod widths;

pub use csv::{escape_cell, render_csv, unescape_cell};
pub use fixed_width::{display_cell, render_fixed_width, render_with_widths};
pub use widths::{analyze_widths, ColumnFormat, ColumnWidthTable, FormatSpec};

use crate::core::{Result, SqlRenderError};
use serde::Deserialize;

/// Separator between fields of a CSV line.
pub const FIELD_SEPARATOR: char = ',';

/// Replacement for a literal comma inside a CSV cell.
pub const COMMA_SENTINEL: &str = "_COMMA_";

/// Replacement for a literal pipe inside a fixed-width cell.
pub const PIPE_SENTINEL: &str = "_PIPE_";

/// Separator between cells of a fixed-width line.
pub const DISPLAY_SEPARATOR: &str = " | ";

/// Token shown in place of an empty or absent cell.
pub const NULL_TOKEN: &str = "null";

/// What to do with a line whose cell count differs from the header's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MalformedRowPolicy {
    /// Pad short lines with empty cells and drop cells past the header's count.
    #[default]
    Pad,
    /// Fail with `SqlRenderError::MalformedRow`.
    Reject,
}

/// Options passed explicitly into every rendering and introspection call.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Emit produced lines at debug level.
    pub debug: bool,
    pub malformed_rows: MalformedRowPolicy,
}

/// Splits a CSV line into its cells.
///
/// Commas inside values were rewritten to `_COMMA_` when the line was built,
/// so every remaining comma is a field boundary. Empty cells are kept,
/// including trailing ones.
pub fn split_fields(line: &str) -> std::str::Split<'_, char> {
    line.split(FIELD_SEPARATOR)
}

/// Splits `line` and fits it to `expected` cells according to `policy`.
///
/// `line_no` is the 0-based position of the line, header included.
pub(crate) fn fitted_cells(
    line_no: usize,
    line: &str,
    expected: usize,
    policy: MalformedRowPolicy,
) -> Result<Vec<&str>> {
    let mut cells: Vec<&str> = split_fields(line).collect();
    if cells.len() != expected {
        match policy {
            MalformedRowPolicy::Reject => {
                return Err(SqlRenderError::MalformedRow {
                    line: line_no,
                    expected,
                    found: cells.len(),
                })
            }
            MalformedRowPolicy::Pad => cells.resize(expected, ""),
        }
    }
    Ok(cells)
}
