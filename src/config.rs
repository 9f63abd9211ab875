//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use crate::dashboard::{dedupe_variables, ChartStyle, TrackedVariable};
use crate::erddap::DEFAULT_BASE_URL;
use chrono::{FixedOffset, Offset, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub chart: ChartStyle,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub erddap: ErddapConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// What to show and where to read it from
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Default document location (path or URL)
    #[serde(default = "default_source")]
    pub source: String,

    /// Title used when the document has no station name
    #[serde(default = "default_title")]
    pub title: String,

    /// Offset from UTC for displayed times, in minutes
    #[serde(default)]
    pub utc_offset_minutes: i32,

    #[serde(default = "TrackedVariable::defaults")]
    pub variables: Vec<TrackedVariable>,
}

fn default_source() -> String {
    "edu_calpoly_marine_morro.json".to_string()
}

fn default_title() -> String {
    "Buoy Dashboard".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            title: default_title(),
            utc_offset_minutes: 0,
            variables: TrackedVariable::defaults(),
        }
    }
}

/// HTTP settings for document and ERDDAP requests
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
        }
    }
}

impl FetchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// ERDDAP document builder settings
#[derive(Debug, Clone, Deserialize)]
pub struct ErddapConfig {
    #[serde(default = "default_erddap_url")]
    pub base_url: String,

    /// Days of hourly data published in a document
    #[serde(default = "default_fill_days")]
    pub fill_days: i64,
}

fn default_erddap_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_fill_days() -> i64 {
    14
}

impl Default for ErddapConfig {
    fn default() -> Self {
        Self {
            base_url: default_erddap_url(),
            fill_days: default_fill_days(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        let mut config: Config = toml::from_str(content)?;
        config.dashboard.variables = dedupe_variables(config.dashboard.variables);
        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load the first config file found in the default locations
    ///
    /// Returns the path the config came from, or `None` when no file exists
    /// and the defaults with environment overrides are used. A file that
    /// exists but cannot be loaded is an error.
    pub fn load_default() -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_paths: Vec<PathBuf> = [
            dirs::config_dir().map(|p| p.join("buoydash").join("config.toml")),
            Some(PathBuf::from("/etc/buoydash/config.toml")),
            Some(PathBuf::from("./buoydash.toml")),
        ]
        .into_iter()
        .flatten()
        .collect();

        Self::load_first(&config_paths)
    }

    fn load_first(paths: &[PathBuf]) -> Result<(Self, Option<PathBuf>), ConfigError> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => Ok((Self::load_with_env(path)?, Some(path.clone()))),
            None => Ok((Self::from_env(), None)),
        }
    }

    /// Offset applied to displayed timestamps
    pub fn utc_offset(&self) -> FixedOffset {
        let seconds = self.dashboard.utc_offset_minutes.checked_mul(60);
        seconds.and_then(FixedOffset::east_opt).unwrap_or_else(|| {
            tracing::warn!(
                minutes = self.dashboard.utc_offset_minutes,
                "UTC offset out of range, using UTC"
            );
            Utc.fix()
        })
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(source) = lookup("BUOYDASH_SOURCE") {
            self.dashboard.source = source;
        }
        if let Some(offset) = lookup("BUOYDASH_UTC_OFFSET_MINUTES") {
            if let Ok(minutes) = offset.parse() {
                self.dashboard.utc_offset_minutes = minutes;
            }
        }

        if let Some(timeout) = lookup("BUOYDASH_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.fetch.timeout_secs = secs;
            }
        }

        if let Some(url) = lookup("BUOYDASH_ERDDAP_URL") {
            self.erddap.base_url = url;
        }

        if let Some(level) = lookup("BUOYDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("BUOYDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Buoydash Configuration
#
# Environment variables override these settings:
# - BUOYDASH_SOURCE
# - BUOYDASH_UTC_OFFSET_MINUTES
# - BUOYDASH_TIMEOUT_SECS
# - BUOYDASH_ERDDAP_URL
# - BUOYDASH_LOG_LEVEL
# - BUOYDASH_LOG_FORMAT

[dashboard]
# Document to render when none is given (path or http(s) URL)
source = "edu_calpoly_marine_morro.json"

# Title when the document has no station name
title = "Buoy Dashboard"

# Offset from UTC for displayed times, in minutes (-420 is PDT)
utc_offset_minutes = 0

# Variables to show, in order. slope_scale is the arrow range used when
# the document has a slope but no scale of its own.
[[dashboard.variables]]
name = "Temperature"
color = "red"
slope_scale = 10.0

[[dashboard.variables]]
name = "Dissolved Oxygen"
color = "blue"
slope_scale = 10.0

[[dashboard.variables]]
name = "Chlorophyll-a"
color = "green"
slope_scale = 40.0

[[dashboard.variables]]
name = "pH"
color = "purple"
slope_scale = 1.0

[chart]
class = "my-chart"
width = 900
height = 300
line_width = 3
label_size = 40

[fetch]
# Request timeout in seconds
timeout_secs = 30

[erddap]
# Tabledap endpoint
base_url = "http://erddap.cencoos.org/erddap/tabledap/"

# Days of hourly data in a built document
fill_days = 14

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
