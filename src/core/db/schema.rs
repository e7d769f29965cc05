/// Schema Introspection Module
///
/// Lists tables and describes table columns through metadata queries chosen
/// per database dialect. The raw metadata result is handed to the rendering
/// pipeline unchanged.

use crate::core::db::query::{QuerySource, TabularResult};
use crate::core::{Result, SqlRenderError};
use crate::render::{render_csv, RenderOptions};
use tracing::debug;

/// Database products with introspection query templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Sqlite,
    SqlServer,
}

impl Dialect {
    pub const ALL: [Dialect; 2] = [Dialect::Sqlite, Dialect::SqlServer];

    /// Marker searched for in the upper-cased product name.
    fn product_marker(self) -> &'static str {
        match self {
            Dialect::Sqlite => "SQLITE",
            Dialect::SqlServer => "MICROSOFT SQL SERVER",
        }
    }

    /// Maps a reported product name onto a dialect, ignoring case and
    /// surrounding whitespace.
    pub fn detect(product_name: &str) -> Option<Dialect> {
        let normalized = product_name.trim().to_uppercase();
        Dialect::ALL
            .into_iter()
            .find(|d| normalized.contains(d.product_marker()))
    }

    /// Query returning one row per user table, as `(type, name)`.
    pub fn list_tables_sql(self) -> &'static str {
        match self {
            Dialect::Sqlite => "SELECT type, name FROM sqlite_master WHERE type = 'table'",
            Dialect::SqlServer => {
                "SELECT TABLE_TYPE, TABLE_NAME FROM INFORMATION_SCHEMA.TABLES WHERE TABLE_TYPE = 'BASE TABLE'"
            }
        }
    }

    /// Query returning one row per column of `table`.
    pub fn describe_table_sql(self, table: &str) -> String {
        let literal = quote_literal(table);
        match self {
            Dialect::Sqlite => format!("PRAGMA table_info({})", literal),
            Dialect::SqlServer => format!(
                "SELECT * FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_NAME = {}",
                literal
            ),
        }
    }
}

/// Quotes `value` as a single-quoted SQL string literal.
fn quote_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Dialect-dispatched metadata queries over a `QuerySource`.
pub struct SchemaIntrospector<'a, S: QuerySource> {
    source: &'a S,
    options: RenderOptions,
}

impl<'a, S: QuerySource> SchemaIntrospector<'a, S> {
    pub fn new(source: &'a S, options: RenderOptions) -> Self {
        SchemaIntrospector { source, options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    fn dialect(&self, operation: &str) -> Result<Dialect> {
        let product = self.source.product_name();
        Dialect::detect(product).ok_or_else(|| SqlRenderError::UnsupportedDialect {
            operation: operation.to_string(),
            product: product.trim().to_uppercase(),
        })
    }

    /// Lists the user tables of the connected database.
    ///
    /// # Errors
    ///
    /// `SqlRenderError::UnsupportedDialect` if the product is not recognized;
    /// no query is issued in that case.
    pub fn list_tables(&self) -> Result<TabularResult> {
        let dialect = self.dialect("list_tables")?;
        self.source.query(dialect.list_tables_sql())
    }

    /// Describes the columns of `table`.
    pub fn describe_table(&self, table: &str) -> Result<TabularResult> {
        let dialect = self.dialect("describe_table")?;
        self.source.query(&dialect.describe_table_sql(table))
    }

    /// Table listing rendered as CSV lines.
    pub fn tables_csv(&self) -> Result<Vec<String>> {
        let lines = render_csv(&self.list_tables()?);
        self.trace_lines("tables", &lines);
        Ok(lines)
    }

    /// Column schema of `table` rendered as CSV lines.
    pub fn table_schema_csv(&self, table: &str) -> Result<Vec<String>> {
        let lines = render_csv(&self.describe_table(table)?);
        self.trace_lines(table, &lines);
        Ok(lines)
    }

    fn trace_lines(&self, subject: &str, lines: &[String]) {
        if self.options.debug {
            for line in lines {
                debug!(subject, "{}", line);
            }
        }
    }
}
