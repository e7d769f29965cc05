use crate::core::{Result, SqlRenderError};
use crate::render::{MalformedRowPolicy, RenderOptions};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Top-level configuration structure parsed from a TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub sqlite: SqliteConfig,
}

/// Rendering configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Emit every produced CSV line at debug level.
    pub debug: bool,
    pub malformed_rows: MalformedRowPolicy,
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            debug: self.debug,
            malformed_rows: self.malformed_rows,
        }
    }
}

/// SQLite-related configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    pub path: String,
    pub query_timeout_secs: u64,
}

impl SqliteConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }
}

impl Default for SqliteConfig {
    fn default() -> Self {
        SqliteConfig {
            path: "test.db".to_string(),
            query_timeout_secs: 30,
        }
    }
}

/// Loads configuration from a TOML file at the given path.
///
/// Missing sections and keys fall back to their defaults.
///
/// # Example
///
/// ```no_run
/// let config = sqlrender::config::load_config("sqlrender.toml").expect("Failed to load config");
/// println!("{:?}", config);
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .map_err(|e| SqlRenderError::Config(format!("cannot read {}: {}", path.display(), e)))?;
    parse_config(&content)
}

/// Parses configuration from TOML text.
pub fn parse_config(content: &str) -> Result<Config> {
    toml::from_str(content).map_err(|e| SqlRenderError::Config(e.to_string()))
}
