//! Configuration file handling.
//!
//! This module handles loading and merging configuration from
//! `.studyboard.toml` files.

use crate::api::ApiClientConfig;
use crate::dashboard::{DashboardSettings, MAX_RECENT_ITEMS};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = ".studyboard.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Platform API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Dashboard aggregation settings.
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Output file path. Empty means stdout.
    #[serde(default)]
    pub output: String,
}

/// Platform API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the platform API.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for each individual request, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    /// Bearer token. Empty means unauthenticated requests.
    #[serde(default)]
    pub token: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            token: String::new(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

/// Dashboard aggregation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Number of recent curriculums and summaries shown.
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,

    #[serde(default = "default_list_page_size")]
    pub curriculum_page_size: u32,

    #[serde(default = "default_list_page_size")]
    pub summary_page_size: u32,

    /// Feedback page size; the average score covers this many items.
    #[serde(default = "default_feedback_page_size")]
    pub feedback_page_size: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
            curriculum_page_size: default_list_page_size(),
            summary_page_size: default_list_page_size(),
            feedback_page_size: default_feedback_page_size(),
        }
    }
}

fn default_recent_limit() -> usize {
    3
}

fn default_list_page_size() -> u32 {
    5
}

fn default_feedback_page_size() -> u32 {
    100
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
        Self::load_from_dir(Path::new("."))
    }

    /// Try to load `.studyboard.toml` from a directory.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);

        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Merge this configuration with CLI arguments.
    ///
    /// CLI arguments take precedence over config file settings.
    /// This method only overrides config when CLI provides explicit values.
    pub fn merge_with_args(&mut self, args: &crate::cli::Args) {
        if let Some(ref api_url) = args.api_url {
            self.api.base_url = api_url.clone();
        }
        if let Some(ref token) = args.token {
            self.api.token = token.clone();
        }
        if let Some(timeout) = args.timeout {
            self.api.timeout_seconds = timeout;
        }
        if let Some(ref output) = args.output {
            self.general.output = output.display().to_string();
        }
    }

    /// Reject settings that would make every run degrade to defaults.
    pub fn validate(&self) -> Result<()> {
        if self.api.timeout_seconds == 0 {
            bail!("api.timeout_seconds must be at least 1 second");
        }
        Ok(())
    }

    /// Connection settings for the HTTP client.
    pub fn client_config(&self) -> ApiClientConfig {
        let token = self.api.token.trim();
        ApiClientConfig {
            base_url: self.api.base_url.clone(),
            timeout_seconds: self.api.timeout_seconds,
            token: (!token.is_empty()).then(|| token.to_string()),
        }
    }

    /// Aggregation settings for one dashboard run.
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            call_timeout: Duration::from_secs(self.api.timeout_seconds),
            recent_limit: self.dashboard.recent_limit.min(MAX_RECENT_ITEMS),
            curriculum_page_size: self.dashboard.curriculum_page_size,
            summary_page_size: self.dashboard.summary_page_size,
            feedback_page_size: self.dashboard.feedback_page_size,
        }
    }

    /// Generate a default configuration file content.
    pub fn default_toml() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_else(|_| String::new())
    }
}
