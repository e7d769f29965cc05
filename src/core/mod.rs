/// Core Module for sqlrender
///
/// Shared infrastructure: the error taxonomy and the database layer that
/// feeds query results into the rendering pipeline.

pub mod db;
pub mod error;

// Re-export commonly used types for convenience
pub use error::{Result, SqlRenderError};
