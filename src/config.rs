//! Configuration management for Nimbus
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_API_URL, DEFAULT_PER_PAGE, DEFAULT_SEARCH_DEBOUNCE_MS, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_HEADER, ENV_API_URL, ENV_USER_EMAIL, MAX_PAGE_SIZE, MAX_SEARCH_DEBOUNCE_MS,
};
use crate::pagination::DEFAULT_PAGE_SIZE;
use crate::ui::core::View;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub fetch: FetchConfig,
    pub ui: UiConfig,
    pub logging: LoggingConfig,
}

/// Inventory API connection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the inventory API, e.g. "https://inventory.example.com/api"
    pub base_url: String,
    /// Operator email recorded as `triggered_by` on power actions.
    /// When unset, the value of `user_header` on API responses is used.
    pub user_email: Option<String>,
    /// Response header carrying the operator identity
    pub user_header: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

/// Pagination of API list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Items requested per API page
    pub page_size: usize,
}

/// UI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// View shown on startup
    /// Options: "accounts", "clusters", "instances", "schedules", "events"
    pub default_view: String,
    /// Rows per table page
    pub per_page: usize,
    /// Delay before a search keystroke is applied, in milliseconds
    pub search_debounce_ms: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file in addition to the in-app log view
    pub enabled: bool,
    /// Minimum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            user_email: None,
            user_header: DEFAULT_USER_HEADER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_view: "clusters".to_string(),
            per_page: DEFAULT_PER_PAGE,
            search_debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults, then apply environment overrides
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        let mut config = if let Some(path) = config_path {
            Self::load_from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Override values from the environment. `lookup` is `std::env::var` outside tests.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            self.api.base_url = url;
        }
        if let Some(email) = lookup(ENV_USER_EMAIL).filter(|v| !v.trim().is_empty()) {
            self.api.user_email = Some(email);
        }
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("nimbus.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("nimbus").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.api.base_url.trim().is_empty() {
            anyhow::bail!("api.base_url cannot be empty");
        }
        if !self.api.base_url.starts_with("http://") && !self.api.base_url.starts_with("https://") {
            anyhow::bail!("api.base_url must start with http:// or https://, got '{}'", self.api.base_url);
        }
        if self.api.user_header.trim().is_empty() {
            anyhow::bail!("api.user_header cannot be empty");
        }
        if self.api.timeout_secs == 0 {
            anyhow::bail!("api.timeout_secs must be at least 1");
        }

        if self.fetch.page_size == 0 || self.fetch.page_size > MAX_PAGE_SIZE {
            anyhow::bail!(
                "fetch.page_size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE,
                self.fetch.page_size
            );
        }

        if View::from_name(&self.ui.default_view).is_none() {
            anyhow::bail!(
                "ui.default_view must be one of {}, got '{}'",
                View::ALL.iter().map(|v| v.name()).collect::<Vec<_>>().join(", "),
                self.ui.default_view
            );
        }
        if self.ui.per_page == 0 || self.ui.per_page > MAX_PAGE_SIZE {
            anyhow::bail!("ui.per_page must be between 1 and {}, got {}", MAX_PAGE_SIZE, self.ui.per_page);
        }
        if self.ui.search_debounce_ms > MAX_SEARCH_DEBOUNCE_MS {
            anyhow::bail!("ui.search_debounce_ms cannot exceed {}", MAX_SEARCH_DEBOUNCE_MS);
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// View to open on startup
    pub fn default_view(&self) -> View {
        View::from_name(&self.ui.default_view).unwrap_or_default()
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# Nimbus Configuration File\n# Generated on {}\n\n",
            crate::utils::datetime::format_today()
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("nimbus"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
