//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::input::keycodes;
use crate::input::touch::MAX_CONTACTS;

/// Input handling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Window holds a keyboard grab (compositor shortcuts inhibited)
    #[serde(default)]
    pub grab_keyboard: bool,

    /// evdev keycode that releases the keyboard grab
    #[serde(default = "default_release_key")]
    pub release_key: u32,

    /// Maximum concurrent touch contacts
    #[serde(default = "default_max_contacts")]
    pub max_contacts: usize,

    /// Attach a multi-touch channel (replay only; otherwise touch is emulated)
    #[serde(default)]
    pub touch_channel: bool,
}

fn default_release_key() -> u32 {
    keycodes::KEY_RIGHTCTRL
}

fn default_max_contacts() -> usize {
    MAX_CONTACTS
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            grab_keyboard: false,
            release_key: default_release_key(),
            max_contacts: default_max_contacts(),
            touch_channel: false,
        }
    }
}

/// Window and remote desktop geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Scale between window and desktop size instead of mapping 1:1
    #[serde(default)]
    pub smart_sizing: bool,

    /// Client window width in pixels
    #[serde(default = "default_width")]
    pub window_width: u32,

    /// Client window height in pixels
    #[serde(default = "default_height")]
    pub window_height: u32,

    /// Remote desktop width in pixels
    #[serde(default = "default_width")]
    pub desktop_width: u32,

    /// Remote desktop height in pixels
    #[serde(default = "default_height")]
    pub desktop_height: u32,
}

fn default_width() -> u32 {
    1920
}

fn default_height() -> u32 {
    1080
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            smart_sizing: false,
            window_width: default_width(),
            window_height: default_height(),
            desktop_width: default_width(),
            desktop_height: default_height(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level ("trace", "debug", "info", "warn", "error")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("pretty", "compact", "json")
    #[serde(default = "default_log_format")]
    pub format: String,

    /// Also write logs to this file
    #[serde(default)]
    pub file: Option<PathBuf>,
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
            file: None,
        }
    }
}
