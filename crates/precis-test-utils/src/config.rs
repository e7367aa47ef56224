//! Configuration builders and temporary config files for tests.

use std::path::PathBuf;

use precis_config::{AppConfig, ThemeMode};
use tempfile::TempDir;

/// Fluent builder for [`AppConfig`] in tests.
///
/// # Example
///
/// ```ignore
/// let config = TestConfigBuilder::new()
///     .theme(ThemeMode::Light)
///     .tick_rate_ms(20)
///     .build();
/// ```
pub struct TestConfigBuilder {
    config: AppConfig,
}

impl TestConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
        }
    }

    pub fn log_level(mut self, level: &str) -> Self {
        self.config.logging.level = level.to_string();
        self
    }

    pub fn theme(mut self, theme: ThemeMode) -> Self {
        self.config.ui.theme = theme;
        self
    }

    pub fn show_progress(mut self, show: bool) -> Self {
        self.config.ui.show_progress = show;
        self
    }

    pub fn tick_rate_ms(mut self, ms: u64) -> Self {
        self.config.ui.tick_rate_ms = ms;
        self
    }

    pub fn log_capacity(mut self, capacity: usize) -> Self {
        self.config.ui.log_capacity = capacity;
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

impl Default for TestConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A config file in a test-scoped temp directory.
///
/// The directory is deleted when this value is dropped, even on panic.
pub struct TestConfigFile {
    pub path: PathBuf,
    _temp_dir: TempDir,
}

impl TestConfigFile {
    /// Write `toml_content` to `precis.toml` in a fresh temp directory.
    pub async fn with_toml(toml_content: &str) -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let path = temp_dir.path().join("precis.toml");
        tokio::fs::write(&path, toml_content)
            .await
            .expect("failed to write test config");
        Self {
            path,
            _temp_dir: temp_dir,
        }
    }

    /// Write `config` serialized as TOML.
    pub async fn from_config(config: &AppConfig) -> Self {
        let text = config.to_toml().expect("config serializes to TOML");
        Self::with_toml(&text).await
    }

    /// Load and validate the file.
    pub async fn load(&self) -> AppConfig {
        AppConfig::load(&self.path)
            .await
            .expect("failed to load test config")
    }
}
