use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "quotedesk.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read and parse a config file.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Resolve the config: an explicit path must exist; otherwise
/// `quotedesk.toml` in `cwd` is used if present, else built-in defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<Config, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }
    let fallback = cwd.join(DEFAULT_CONFIG_FILE);
    if fallback.is_file() {
        read_config(&fallback)
    } else {
        Ok(Config::default())
    }
}
