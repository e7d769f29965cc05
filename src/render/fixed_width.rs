//! Column-aligned rendering of CSV lines.
//!
//! Each cell is left-justified to its column's width and followed by ` | `;
//! the final separator and any whitespace before it are removed.

use super::csv::unescape_cell;
use super::widths::{analyze_widths, ColumnWidthTable};
use super::{fitted_cells, split_fields, RenderOptions, NULL_TOKEN, PIPE_SENTINEL};
use crate::core::Result;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use tracing::{debug, warn};

static TRAILING_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*\|\s*$").expect("trailing separator pattern is valid"));

/// The text shown for one CSV cell.
///
/// Empty and whitespace-only cells become `null`; otherwise `_COMMA_` is
/// turned back into `,` and literal `|` becomes `_PIPE_`.
pub fn display_cell(cell: &str) -> Cow<'_, str> {
    if cell.trim().is_empty() {
        return Cow::Borrowed(NULL_TOKEN);
    }
    let restored = unescape_cell(cell);
    if restored.contains('|') {
        Cow::Owned(restored.replace('|', PIPE_SENTINEL))
    } else {
        Cow::Owned(restored)
    }
}

/// Renders CSV lines (header first) as a padded, pipe-delimited table.
pub fn render_fixed_width<S: AsRef<str>>(
    lines: &[S],
    opts: &RenderOptions,
) -> Result<Vec<String>> {
    let widths = analyze_widths(lines, opts)?;
    render_with_widths(lines, &widths, opts)
}

/// Renders CSV lines against a precomputed width table.
///
/// Lines whose cell count differs from the table are padded with `null` cells
/// or truncated under `MalformedRowPolicy::Pad`, and rejected under `Reject`.
pub fn render_with_widths<S: AsRef<str>>(
    lines: &[S],
    widths: &ColumnWidthTable,
    opts: &RenderOptions,
) -> Result<Vec<String>> {
    let spec = widths.format_spec();
    let mut rendered = Vec::with_capacity(lines.len());

    for (line_no, line) in lines.iter().enumerate() {
        let line = line.as_ref();
        let found = split_fields(line).count();
        let cells = fitted_cells(line_no, line, spec.len(), opts.malformed_rows)?;
        if found != spec.len() {
            warn!(
                line = line_no,
                expected = spec.len(),
                found,
                "fitted malformed line to header width"
            );
        }

        let mut out = String::new();
        for (column, cell) in cells.iter().enumerate() {
            if let Some(format) = spec.column(column) {
                format.apply(&display_cell(cell), &mut out);
            }
        }

        let out = TRAILING_SEPARATOR.replace(&out, "").into_owned();
        if opts.debug {
            debug!(line = line_no, "{}", out);
        }
        rendered.push(out);
    }

    Ok(rendered)
}
