//! Attest configuration file handling

use anyhow::{Context, Result};
use attest_pages::DEFAULT_SUBMIT_DELAY_MS;
use attest_theme::watcher::DEFAULT_POLL_MS;
use attest_theme::{ColorSchemeSource, ThemeContext, ThemePreference};
use attest_widgets::Motion;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Default config file name
pub const CONFIG_FILE: &str = "attest.toml";

/// Top-level configuration (attest.toml)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AttestConfig {
    pub theme: ThemeConfig,
    pub motion: MotionConfig,
    pub runtime: RuntimeConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ThemeConfig {
    #[serde(default)]
    pub preference: ThemePreference,
    /// How often the system scheme is polled while a scenario runs
    #[serde(default = "default_poll_ms")]
    pub poll_ms: u64,
}

fn default_poll_ms() -> u64 {
    DEFAULT_POLL_MS
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            preference: ThemePreference::default(),
            poll_ms: default_poll_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MotionConfig {
    /// Honor a reduced-motion preference
    #[serde(default)]
    pub reduced: bool,
}

impl MotionConfig {
    pub fn motion(&self) -> Motion {
        Motion::from_reduced(self.reduced)
    }
}

/// Headless runtime settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RuntimeConfig {
    /// Logical milliseconds per frame
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_tick_ms() -> u64 {
    16
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    800
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            width: default_width(),
            height: default_height(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ContactConfig {
    /// Delay before a simulated submission succeeds
    #[serde(default = "default_submit_delay_ms")]
    pub submit_delay_ms: u64,
}

fn default_submit_delay_ms() -> u64 {
    DEFAULT_SUBMIT_DELAY_MS
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            submit_delay_ms: default_submit_delay_ms(),
        }
    }
}

impl AttestConfig {
    /// Load configuration from a file or a directory containing attest.toml
    ///
    /// A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let config_path = if path.is_dir() {
            path.join(CONFIG_FILE)
        } else {
            path.to_path_buf()
        };

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_toml(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }

    /// Install the process-wide theme context for the configured preference
    ///
    /// Fails if a context is already installed.
    pub fn install_theme(
        &self,
        environment: Arc<dyn ColorSchemeSource>,
    ) -> Result<&'static ThemeContext> {
        ThemeContext::new(self.theme.preference, environment)
            .install()
            .context("Failed to install the theme context")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(AttestConfig::from_toml("").unwrap(), AttestConfig::default());
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config = AttestConfig::from_toml(
            r#"
            [theme]
            preference = "dark"

            [runtime]
            tick_ms = 8
            "#,
        )
        .unwrap();
        assert_eq!(config.theme.preference, ThemePreference::Dark);
        assert_eq!(config.theme.poll_ms, DEFAULT_POLL_MS);
        assert_eq!(config.runtime.tick_ms, 8);
        assert_eq!(config.runtime.width, 1280);
        assert_eq!(config.contact.submit_delay_ms, DEFAULT_SUBMIT_DELAY_MS);
        assert_eq!(config.motion.motion(), Motion::Full);
    }

    #[test]
    fn test_bad_preference_is_an_error() {
        assert!(AttestConfig::from_toml("[theme]\npreference = \"sepia\"").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AttestConfig::load(Path::new("does/not/exist/attest.toml")).unwrap();
        assert_eq!(config, AttestConfig::default());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AttestConfig::default();
        config.motion.reduced = true;
        let text = config.to_toml().unwrap();
        assert_eq!(AttestConfig::from_toml(&text).unwrap(), config);
    }
}
