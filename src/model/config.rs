use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

use super::filter::{SearchField, StatusFilter, ViewFilter};

/// Hosted quote service used when nothing else is configured
pub const DEFAULT_API_URL: &str = "https://rabbit-epcrhpbjczbxcwas.southindia-01.azurewebsites.net/api";

/// Configuration from quotedesk.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the REST API; `quotes` is appended to it
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout. Absent = transport default.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_API_URL.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default)]
    pub default_status: StatusFilter,
    #[serde(default)]
    pub default_search_field: SearchField,
    #[serde(default = "default_true")]
    pub show_key_hints: bool,
    /// Hex color overrides keyed by theme slot (e.g. `highlight = "#FB4196"`)
    #[serde(default)]
    pub colors: HashMap<String, String>,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            default_status: StatusFilter::default(),
            default_search_field: SearchField::default(),
            show_key_hints: true,
            colors: HashMap::new(),
        }
    }
}

impl UiConfig {
    /// Initial filter for a fresh dashboard
    pub fn view_filter(&self) -> ViewFilter {
        ViewFilter::new(self.default_status, self.default_search_field, "")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log file used while the TUI owns the terminal
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
    /// Filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            file: default_log_file(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_file() -> PathBuf {
    PathBuf::from("quotedesk.log")
}

fn default_log_level() -> String {
    "warn".to_string()
}
