// Core infrastructure modules
pub mod config;
pub mod core;

// Rendering pipeline and output
pub mod display;
pub mod render;

// Sample walkthrough data
pub mod people;

#[cfg(test)]
mod test_utils;

pub use crate::core::db::{Dialect, QuerySource, SchemaIntrospector, SqliteSource, TabularResult};
pub use crate::core::{Result, SqlRenderError};
pub use crate::render::{MalformedRowPolicy, RenderOptions};
