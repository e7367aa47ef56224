#![deny(unsafe_code)]

//! Configuration loading and validation for the Précis hosts.
//!
//! The summary engine takes no options; this crate configures the programs
//! around it. [`AppConfig`] is read from TOML, every section is optional, and
//! [`AppConfig::validate`] runs after every load.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    Validation(String),
}

/// Top-level application configuration.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Terminal UI appearance and behavior.
    #[serde(default)]
    pub ui: UiConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive (e.g. "info", "precis_core=debug").
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Color scheme of the terminal UI.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Dark,
    Light,
}

impl ThemeMode {
    /// The other mode.
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Dark => "dark",
            ThemeMode::Light => "light",
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal UI configuration.
///
/// ## TOML Example
///
/// ```toml
/// [ui]
/// theme = "light"
/// show_progress = true
/// tick_rate_ms = 100
/// log_capacity = 500
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UiConfig {
    /// Theme used at startup; toggled at runtime with `t`.
    #[serde(default)]
    pub theme: ThemeMode,

    /// Draw a progress gauge while a summary is being computed.
    #[serde(default = "default_show_progress")]
    pub show_progress: bool,

    /// Event poll interval in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Number of log entries kept for the Logs panel.
    #[serde(default = "default_log_capacity")]
    pub log_capacity: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            show_progress: default_show_progress(),
            tick_rate_ms: default_tick_rate_ms(),
            log_capacity: default_log_capacity(),
        }
    }
}

fn default_show_progress() -> bool {
    true
}

fn default_tick_rate_ms() -> u64 {
    100
}

fn default_log_capacity() -> usize {
    500
}

/// Accepted range for `ui.tick_rate_ms`.
pub const TICK_RATE_RANGE_MS: std::ops::RangeInclusive<u64> = 10..=1000;

impl AppConfig {
    /// Load configuration from a TOML file at the given path using async I/O.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    ///
    /// A file that exists but fails to read, parse, or validate is an error.
    pub async fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if tokio::fs::try_exists(path).await? {
            Self::load(path).await
        } else {
            tracing::info!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.level must not be empty".to_string(),
            ));
        }
        if !TICK_RATE_RANGE_MS.contains(&self.ui.tick_rate_ms) {
            return Err(ConfigError::Validation(format!(
                "ui.tick_rate_ms must be in {}..={}, got {}",
                TICK_RATE_RANGE_MS.start(),
                TICK_RATE_RANGE_MS.end(),
                self.ui.tick_rate_ms
            )));
        }
        if self.ui.log_capacity == 0 {
            return Err(ConfigError::Validation(
                "ui.log_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Render as pretty TOML for display.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}
