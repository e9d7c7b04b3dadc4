// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::config::model::GraphConfig;
use crate::dag::Graph;
use crate::errors::Result;

/// Source format of a configuration file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    /// `.json` files are JSON; everything else is treated as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }
}

/// Parse configuration text in the given format.
///
/// This only performs deserialization; it does **not** check start markers
/// or delays. Use [`Graph::build`] or [`load_graph`] for that.
pub fn parse_str(contents: &str, format: ConfigFormat) -> Result<GraphConfig> {
    let config: GraphConfig = match format {
        ConfigFormat::Toml => toml::from_str(contents)?,
        ConfigFormat::Json => serde_json::from_str(contents)?,
    };
    Ok(config)
}

/// Load a configuration file from a given path and return the raw
/// [`GraphConfig`].
pub fn load_from_path(path: impl AsRef<Path>) -> Result<GraphConfig> {
    let path = path.as_ref();
    let format = ConfigFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading graph config");

    let contents = fs::read_to_string(path)?;
    parse_str(&contents, format)
}

/// Load a configuration file and build the validated, immutable [`Graph`].
///
/// This is the recommended entry point for the rest of the application.
pub fn load_graph(path: impl AsRef<Path>) -> Result<Graph> {
    let config = load_from_path(path)?;
    Graph::build(&config)
}
