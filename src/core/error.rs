/// sqlrender Error Module
///
/// This module defines the error taxonomy shared by the query layer, schema
/// introspection and the rendering pipeline.
use thiserror::Error;

/// Error type for every fallible operation in sqlrender.
///
/// The variants map onto the failure classes a caller needs to tell apart:
/// - driver and query failures (fatal for the current rendering only)
/// - unsupported database products (fatal setup error)
/// - rows whose cell count disagrees with the header
/// - configuration and output sink failures
#[derive(Error, Debug)]
pub enum SqlRenderError {
    /// Driver errors raised outside of reading a result set
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The data source failed to produce or iterate a result
    #[error("Query error: {0}")]
    Query(String),

    /// Schema introspection against a product with no query template
    #[error("Unsupported dialect: {operation}() has no query for database product '{product}'")]
    UnsupportedDialect { operation: String, product: String },

    /// A row whose cell count disagrees with the header
    #[error("Malformed row at line {line}: expected {expected} cells, found {found}")]
    MalformedRow {
        line: usize,
        expected: usize,
        found: usize,
    },

    /// Configuration loading and validation errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Output sink errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SqlRenderError {
    /// Whether the process should stop rather than continue with the next operation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SqlRenderError::UnsupportedDialect { .. } | SqlRenderError::Config(_)
        )
    }
}

/// Type alias for Result to use SqlRenderError as the error type.
pub type Result<T> = std::result::Result<T, SqlRenderError>;
