//! Configuration management
//!
//! Handles loading, validation, and merging of configuration from:
//! - TOML files
//! - CLI arguments

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::input::{DesktopScaler, TranslatorOptions};

pub mod types;

pub use types::{DisplayConfig, InputConfig, LoggingConfig};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
    /// Display geometry
    #[serde(default)]
    pub display: DisplayConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path))?;

        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;

        config.validate()?;
        Ok(config)
    }

    /// Create default configuration
    pub fn default_config() -> Result<Self> {
        let config = Config::default();
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.input.max_contacts == 0 {
            anyhow::bail!("input.max_contacts must be at least 1");
        }

        if self.display.smart_sizing {
            let dims = [
                ("window_width", self.display.window_width),
                ("window_height", self.display.window_height),
                ("desktop_width", self.display.desktop_width),
                ("desktop_height", self.display.desktop_height),
            ];
            for (name, value) in dims {
                if value == 0 {
                    anyhow::bail!("display.{} must be non-zero with smart_sizing", name);
                }
            }
        }

        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Invalid log level: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "pretty" | "compact" | "json" => {}
            _ => anyhow::bail!("Invalid log format: {}", self.logging.format),
        }

        Ok(())
    }

    /// Override config with CLI arguments
    pub fn with_overrides(
        mut self,
        grab_keyboard: bool,
        touch_channel: bool,
        log_format: Option<String>,
        log_file: Option<PathBuf>,
    ) -> Self {
        if grab_keyboard {
            self.input.grab_keyboard = true;
        }
        if touch_channel {
            self.input.touch_channel = true;
        }
        if let Some(format) = log_format {
            self.logging.format = format;
        }
        if log_file.is_some() {
            self.logging.file = log_file;
        }

        self
    }

    /// Translator settings from the `[input]` section
    pub fn translator_options(&self) -> TranslatorOptions {
        TranslatorOptions {
            grab_keyboard: self.input.grab_keyboard,
            release_key: self.input.release_key,
            max_contacts: self.input.max_contacts,
        }
    }

    /// Coordinate scaler from the `[display]` section
    ///
    /// Smart-sizing off maps 1:1 whatever the sizes say.
    pub fn scaler(&self) -> DesktopScaler {
        if !self.display.smart_sizing {
            return DesktopScaler::identity();
        }

        DesktopScaler::new(
            (self.display.window_width, self.display.window_height),
            (self.display.desktop_width, self.display.desktop_height),
        )
    }
}
