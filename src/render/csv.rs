//! CSV rendering of a `TabularResult`.
//!
//! No quoting is used. A literal comma inside a value is replaced with
//! `_COMMA_`, which keeps every line splittable on `,`. Absent cells render as
//! the empty string, the same as a present empty string.

use super::{COMMA_SENTINEL, FIELD_SEPARATOR};
use crate::core::db::TabularResult;

/// Renders the header line followed by one line per row.
///
/// Lines are joined, never terminated, with the separator, so a row whose
/// last cells are empty keeps them: `["2", "", ""]` renders as `2,,`.
pub fn render_csv(result: &TabularResult) -> Vec<String> {
    let mut lines = Vec::with_capacity(result.row_count() + 1);

    lines.push(join_cells(
        result.columns().iter().map(|name| escape_cell(Some(name.as_str()))),
    ));
    for row in result.rows() {
        lines.push(join_cells(row.iter().map(|cell| escape_cell(cell.as_deref()))));
    }

    lines
}

/// Escapes one cell value for a CSV line.
pub fn escape_cell(value: Option<&str>) -> String {
    match value {
        Some(v) => v.replace(FIELD_SEPARATOR, COMMA_SENTINEL),
        None => String::new(),
    }
}

/// Reverses `escape_cell` for a present value.
pub fn unescape_cell(cell: &str) -> String {
    cell.replace(COMMA_SENTINEL, ",")
}

fn join_cells<I>(cells: I) -> String
where
    I: Iterator<Item = String>,
{
    let mut line = String::new();
    for (i, cell) in cells.enumerate() {
        if i > 0 {
            line.push(FIELD_SEPARATOR);
        }
        line.push_str(&cell);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(columns: &[&str], rows: &[&[Option<&str>]]) -> TabularResult {
        TabularResult::from_rows(
            columns.iter().map(|c| c.to_string()).collect(),
            rows.iter()
                .map(|r| Ok(r.iter().map(|c| c.map(String::from)).collect())),
        )
        .unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let t = result(&["Id", "LastName"], &[&[Some("1"), Some("O,Brien")]]);
        assert_eq!(render_csv(&t), vec!["Id,LastName", "1,O_COMMA_Brien"]);
    }

    #[test]
    fn test_line_count_is_rows_plus_header() {
        let t = result(
            &["a"],
            &[&[Some("1")], &[Some("2")], &[None]],
        );
        assert_eq!(render_csv(&t).len(), 4);

        let empty = TabularResult::new(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(render_csv(&empty), vec!["a,b"]);
    }

    #[test]
    fn test_only_one_trailing_separator_is_ever_absent() {
        let t = result(&["Id", "a", "b"], &[&[Some("2"), Some(""), None]]);
        assert_eq!(render_csv(&t)[1], "2,,");
    }

    #[test]
    fn test_trailing_comma_inside_value_is_escaped() {
        let t = result(&["a", "b"], &[&[Some("x"), Some("y,")]]);
        assert_eq!(render_csv(&t)[1], "x,y_COMMA_");
    }

    #[test]
    fn test_escape_roundtrip() {
        for value in ["", "plain", "a,b,c", ",", "Smith, Jr."] {
            let escaped = escape_cell(Some(value));
            assert!(!escaped.contains(','));
            assert_eq!(unescape_cell(&escaped), value);
        }
        assert_eq!(escape_cell(None), "");
    }
}
