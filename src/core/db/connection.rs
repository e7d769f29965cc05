/// Connection Management Module
///
/// Opens SQLite connections with the configured statement timeout and exposes
/// them through the `QuerySource` trait.

use crate::config::SqliteConfig;
use crate::core::db::query::{QuerySource, TabularResult};
use crate::core::{Result, SqlRenderError};
use crate::render::{render_csv, RenderOptions};
use rusqlite::{params, Batch, Connection};
use std::time::Duration;
use tracing::debug;

/// Product name reported for SQLite connections.
pub const SQLITE_PRODUCT_NAME: &str = "SQLite";

/// Logged after each result set's lines when debug output is on.
pub const RESULT_SET_DIVIDER: &str = "====================";

/// A SQLite connection usable as a `QuerySource`.
#[derive(Debug)]
pub struct SqliteSource {
    connection: Connection,
}

impl SqliteSource {
    /// Opens (creating if needed) the database at `config.path`.
    ///
    /// # Errors
    ///
    /// Returns `SqlRenderError::Database` if the file cannot be opened or the
    /// timeout cannot be applied.
    pub fn open(config: &SqliteConfig) -> Result<Self> {
        debug!(path = %config.path, "opening database");
        let connection = Connection::open(&config.path)?;
        Self::with_connection(connection, config.query_timeout())
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory()?;
        Self::with_connection(connection, SqliteConfig::default().query_timeout())
    }

    fn with_connection(connection: Connection, timeout: Duration) -> Result<Self> {
        connection.busy_timeout(timeout)?;
        Ok(SqliteSource { connection })
    }

    /// The underlying connection, for statements that are not queries.
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Runs a script of `;`-separated statements and collects one
    /// `TabularResult` per statement that produces columns.
    ///
    /// Statements without result columns (DDL, plain DML) are executed and
    /// contribute nothing. Execution stops at the first failing statement;
    /// the statements before it stay applied.
    ///
    /// # Errors
    ///
    /// Returns `SqlRenderError::Query` naming the 0-based statement that
    /// failed to prepare or run.
    pub fn query_batch(&self, sql: &str) -> Result<Vec<TabularResult>> {
        debug!(%sql, "executing batch");
        let mut batch = Batch::new(&self.connection, sql);
        let mut results = Vec::new();
        let mut index = 0;

        while let Some(mut stmt) = batch.next().map_err(|e| {
            SqlRenderError::Query(format!("Failed to prepare statement {}: {}", index, e))
        })? {
            if stmt.column_count() == 0 {
                stmt.execute([]).map_err(|e| {
                    SqlRenderError::Query(format!("Statement {} failed: {}", index, e))
                })?;
            } else {
                results.push(TabularResult::from_statement(&mut stmt)?);
            }
            index += 1;
        }

        debug!(statements = index, results = results.len(), "batch finished");
        Ok(results)
    }

    /// `query_batch` with every result set rendered as CSV lines.
    ///
    /// With `opts.debug` set, each list is logged line by line and followed
    /// by `RESULT_SET_DIVIDER`.
    pub fn query_batch_csv(&self, sql: &str, opts: &RenderOptions) -> Result<Vec<Vec<String>>> {
        let lists: Vec<Vec<String>> = self.query_batch(sql)?.iter().map(render_csv).collect();
        if opts.debug {
            for lines in &lists {
                for line in lines {
                    debug!("{}", line);
                }
                debug!("{}", RESULT_SET_DIVIDER);
            }
        }
        Ok(lists)
    }
}

impl QuerySource for SqliteSource {
    fn product_name(&self) -> &str {
        SQLITE_PRODUCT_NAME
    }

    fn query(&self, sql: &str) -> Result<TabularResult> {
        debug!(%sql, "executing query");
        let mut stmt = self
            .connection
            .prepare(sql)
            .map_err(|e| SqlRenderError::Query(format!("Failed to prepare statement: {}", e)))?;
        TabularResult::from_statement(&mut stmt)
    }
}

/// Checks whether a table or view called `name` exists.
pub fn table_exists(conn: &Connection, name: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type IN ('table', 'view') AND name = ?1",
        params![name],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::capture_logs;
    use tempfile::NamedTempFile;

    const TWO_RESULT_SCRIPT: &str = "
        CREATE TABLE t (a INTEGER, b TEXT);
        INSERT INTO t VALUES (1, 'x'), (2, 'y,z');
        SELECT a, b FROM t ORDER BY a;
        SELECT COUNT(*) AS n FROM t;
    ";

    #[test]
    fn test_query_through_source() {
        let source = SqliteSource::open_in_memory().unwrap();
        source
            .connection()
            .execute_batch("CREATE TABLE t (a INTEGER, b TEXT); INSERT INTO t VALUES (1, 'x');")
            .unwrap();

        let result = source.query("SELECT a, b FROM t").unwrap();
        assert_eq!(result.columns(), ["a", "b"]);
        assert_eq!(result.row_count(), 1);
        assert_eq!(source.product_name(), "SQLite");
    }

    #[test]
    fn test_query_error_handling() {
        let source = SqliteSource::open_in_memory().unwrap();
        let result = source.query("SELECT * FROM nonexistent_table");

        match result {
            Err(SqlRenderError::Query(msg)) => assert!(msg.contains("no such table")),
            other => panic!("Expected Query error, got {:?}", other),
        }
    }

    #[test]
    fn test_table_exists() {
        let source = SqliteSource::open_in_memory().unwrap();
        let conn = source.connection();
        assert!(!table_exists(conn, "Person").unwrap());

        conn.execute_batch(
            "CREATE TABLE Person (Id INTEGER); CREATE VIEW Adults AS SELECT * FROM Person;",
        )
        .unwrap();
        assert!(table_exists(conn, "Person").unwrap());
        assert!(table_exists(conn, "Adults").unwrap());
    }

    #[test]
    fn test_open_file_database() {
        let file = NamedTempFile::new().unwrap();
        let config = SqliteConfig {
            path: file.path().to_string_lossy().into_owned(),
            query_timeout_secs: 5,
        };
        let source = SqliteSource::open(&config).unwrap();
        assert!(source.query("SELECT 1").is_ok());
    }

    #[test]
    fn test_connection_error_handling() {
        let config = SqliteConfig {
            path: "/nonexistent/path/database.db".to_string(),
            query_timeout_secs: 1,
        };
        match SqliteSource::open(&config) {
            Err(SqlRenderError::Database(_)) => {}
            other => panic!("Expected Database error, got {:?}", other),
        }
    }

    #[test]
    fn test_query_batch_returns_each_result_set() {
        let source = SqliteSource::open_in_memory().unwrap();
        let results = source.query_batch(TWO_RESULT_SCRIPT).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].columns(), ["a", "b"]);
        assert_eq!(results[0].row_count(), 2);
        assert_eq!(results[1].columns(), ["n"]);
        assert_eq!(results[1].rows()[0][0].as_deref(), Some("2"));
    }

    #[test]
    fn test_query_batch_without_selects() {
        let source = SqliteSource::open_in_memory().unwrap();
        let results = source.query_batch("CREATE TABLE t (a INTEGER);").unwrap();
        assert!(results.is_empty());
        assert!(table_exists(source.connection(), "t").unwrap());
    }

    #[test]
    fn test_query_batch_stops_at_failing_statement() {
        let source = SqliteSource::open_in_memory().unwrap();
        let result = source.query_batch("SELECT 1; SELECT * FROM missing; SELECT 2;");

        match result {
            Err(SqlRenderError::Query(msg)) => {
                assert!(msg.contains("statement 1"));
                assert!(msg.contains("no such table"));
            }
            other => panic!("Expected Query error, got {:?}", other),
        }
    }

    #[test]
    fn test_query_batch_csv() {
        let source = SqliteSource::open_in_memory().unwrap();
        let lists = source
            .query_batch_csv(TWO_RESULT_SCRIPT, &RenderOptions::default())
            .unwrap();
        assert_eq!(
            lists,
            vec![
                vec!["a,b", "1,x", "2,y_COMMA_z"],
                vec!["n", "2"],
            ]
        );
    }

    #[test]
    fn test_query_batch_csv_logs_lists_when_debugging() {
        let source = SqliteSource::open_in_memory().unwrap();
        let debug = RenderOptions {
            debug: true,
            ..RenderOptions::default()
        };
        let (lists, logs) = capture_logs(|| source.query_batch_csv(TWO_RESULT_SCRIPT, &debug));
        assert_eq!(lists.unwrap().len(), 2);
        assert!(logs.contains("2,y_COMMA_z"));
        assert_eq!(logs.matches(RESULT_SET_DIVIDER).count(), 2);

        let source = SqliteSource::open_in_memory().unwrap();
        let quiet = RenderOptions::default();
        let (_, logs) = capture_logs(|| source.query_batch_csv(TWO_RESULT_SCRIPT, &quiet));
        assert!(!logs.contains(RESULT_SET_DIVIDER));
    }
}
