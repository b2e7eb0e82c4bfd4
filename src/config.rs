//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.bizpulse.toml` files.

use crate::models::{Navigation, DEFAULT_CHART_TYPES};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file name.
pub const CONFIG_FILE: &str = ".bizpulse.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Analytics backend settings.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Page paths used for navigation.
    #[serde(default)]
    pub pages: PagesConfig,

    /// Loading stage pacing.
    #[serde(default)]
    pub loading: LoadingConfig,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// File holding the session store.
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Key the analysis record is stored under.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Enable verbose logging by default.
    #[serde(default)]
    pub verbose: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            storage_key: default_storage_key(),
            verbose: false,
        }
    }
}

fn default_store_path() -> String {
    ".bizpulse/session.json".to_string()
}

fn default_storage_key() -> String {
    "businessData".to_string()
}

/// Analytics backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL the endpoints hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds. Unset means the HTTP client's default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,

    /// Chart categories requested from `/charts`.
    #[serde(default = "default_chart_types")]
    pub chart_types: Vec<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: None,
            chart_types: default_chart_types(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_chart_types() -> Vec<String> {
    DEFAULT_CHART_TYPES.iter().map(|s| s.to_string()).collect()
}

/// Relative page paths for each navigation target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_entry_page")]
    pub entry: String,

    #[serde(default = "default_loading_page")]
    pub loading: String,

    #[serde(default = "default_dashboard_page")]
    pub dashboard: String,
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            entry: default_entry_page(),
            loading: default_loading_page(),
            dashboard: default_dashboard_page(),
        }
    }
}

fn default_entry_page() -> String {
    "/Index/index.html".to_string()
}

fn default_loading_page() -> String {
    "/Loading/loading.html".to_string()
}

fn default_dashboard_page() -> String {
    "/Dashboard/dashboard.html".to_string()
}

impl PagesConfig {
    /// Page path for a navigation target.
    pub fn path_for(&self, navigation: Navigation) -> &str {
        match navigation {
            Navigation::Entry => &self.entry,
            Navigation::Loading => &self.loading,
            Navigation::Dashboard => &self.dashboard,
        }
    }
}

/// Loading stage pacing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadingConfig {
    /// Delay before the first enrichment call, in milliseconds.
    #[serde(default = "default_trigger_delay")]
    pub trigger_delay_ms: u64,

    /// Time between animation steps, in milliseconds.
    #[serde(default = "default_step_interval")]
    pub step_interval_ms: u64,
}

impl Default for LoadingConfig {
    fn default() -> Self {
        Self {
            trigger_delay_ms: default_trigger_delay(),
            step_interval_ms: default_step_interval(),
        }
    }
}

fn default_trigger_delay() -> u64 {
    3000
}

fn default_step_interval() -> u64 {
    500
}

impl Config {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Try to load configuration from the default location.
    ///
    /// Returns `Ok(None)` if the file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings, but only
    /// when they were actually given.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref store) = args.store {
            self.general.store_path = store.display().to_string();
        }
        if let Some(ref url) = args.backend_url {
            self.backend.base_url = url.clone();
        }
        if let Some(timeout) = args.timeout {
            self.backend.timeout_seconds = Some(timeout);
        }
        if let Some(delay) = args.delay_ms {
            self.loading.trigger_delay_ms = delay;
        }

        if args.verbose {
            self.general.verbose = true;
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
