/// Query Result Module
///
/// This module turns a live result cursor into a `TabularResult`: ordered
/// column names plus rows of nullable string cells. It is the only entry point
/// the rendering pipeline accepts data through.

use crate::core::{Result, SqlRenderError};
use rusqlite::{types::ValueRef, Statement};
use tracing::debug;

/// In-memory column and row representation of a query outcome.
///
/// Every row holds exactly `columns().len()` cells. A `None` cell is an
/// absent (NULL) value. Once built the result is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabularResult {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl TabularResult {
    /// Creates a result with the given columns and no rows.
    pub fn new(columns: Vec<String>) -> Self {
        TabularResult {
            columns,
            rows: Vec::new(),
        }
    }

    /// Builds a result by consuming a fallible row sequence exactly once.
    ///
    /// The first failing row aborts the build with that row's error. A row
    /// whose length differs from the column count is rejected with
    /// `SqlRenderError::MalformedRow`, where `line` counts the header as line 0.
    pub fn from_rows<I>(columns: Vec<String>, rows: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Vec<Option<String>>>>,
    {
        let expected = columns.len();
        let mut collected = Vec::new();

        for row in rows {
            let row = row?;
            if row.len() != expected {
                return Err(SqlRenderError::MalformedRow {
                    line: collected.len() + 1,
                    expected,
                    found: row.len(),
                });
            }
            collected.push(row);
        }

        Ok(TabularResult {
            columns,
            rows: collected,
        })
    }

    /// Drains a prepared statement into a `TabularResult`.
    ///
    /// The statement is stepped once from start to end; the cursor is
    /// released when this function returns, whether it succeeds or not.
    ///
    /// # Errors
    ///
    /// Returns `SqlRenderError::Query` if execution or any row read fails. The
    /// message names the 0-based row that failed.
    pub fn from_statement(stmt: &mut Statement<'_>) -> Result<Self> {
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let column_count = columns.len();

        let mut cursor = stmt
            .query([])
            .map_err(|e| SqlRenderError::Query(format!("Query execution failed: {}", e)))?;

        let mut rows = Vec::new();
        while let Some(row) = cursor.next().map_err(|e| {
            SqlRenderError::Query(format!("Failed to read row {}: {}", rows.len(), e))
        })? {
            let mut cells = Vec::with_capacity(column_count);
            for i in 0..column_count {
                let value = row.get_ref(i).map_err(|e| {
                    SqlRenderError::Query(format!(
                        "Failed to read column '{}' of row {}: {}",
                        columns[i],
                        rows.len(),
                        e
                    ))
                })?;
                cells.push(cell_text(value));
            }
            rows.push(cells);
        }

        debug!(columns = column_count, rows = rows.len(), "result set consumed");
        Ok(TabularResult { columns, rows })
    }

    /// Column names in query order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Data rows in cursor order.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// The "execute query / get tabular result" side of a database connection.
///
/// Implementors own the connection; the rendering pipeline only sees the
/// `TabularResult` they hand back.
pub trait QuerySource {
    /// Product name as reported by the database (e.g. "SQLite").
    fn product_name(&self) -> &str;

    /// Executes `sql` and returns its complete result.
    fn query(&self, sql: &str) -> Result<TabularResult>;
}

/// Converts a SQLite value into its cell text.
///
/// NULL becomes an absent cell. BLOBs are summarized rather than rendered.
fn cell_text(value: ValueRef) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(i) => Some(i.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Some(format!("<BLOB: {} bytes>", b.len())),
    }
}
