//! Configuration for the chat mockup.
//!
//! Settings live in a JSON file (by default `.neko/config.json` in the
//! working directory). Every field has a default, so a partial file or no
//! file at all is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::seed;

/// Directory holding the config file.
pub const CONFIG_DIR: &str = ".neko";

/// Config file name inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.json";

/// Main configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Delay before the simulated reply lands, in milliseconds.
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,

    /// Text of every simulated reply.
    #[serde(default = "default_canned_reply")]
    pub canned_reply: String,

    /// Name shown above assistant messages.
    #[serde(default = "default_assistant_name")]
    pub assistant_name: String,

    /// Persona shown in the header.
    #[serde(default = "default_persona")]
    pub persona: String,

    /// Color theme.
    #[serde(default)]
    pub theme: ThemeChoice,

    /// UI tick rate in milliseconds.
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,

    /// Destination of the "Watch Shorts" button.
    #[serde(default = "default_shorts_url")]
    pub shorts_url: String,
}

fn default_reply_delay_ms() -> u64 {
    1000
}

fn default_canned_reply() -> String {
    seed::CANNED_REPLY.into()
}

fn default_assistant_name() -> String {
    seed::ASSISTANT_NAME.into()
}

fn default_persona() -> String {
    seed::PERSONA.into()
}

fn default_tick_rate_ms() -> u64 {
    250
}

fn default_shorts_url() -> String {
    "https://v0-fandom-navigation-recreation.vercel.app/dramas?buddy=orange-cat".into()
}

/// Light or dark palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeChoice {
    #[default]
    Light,
    Dark,
}

impl std::str::FromStr for ThemeChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_ms: default_reply_delay_ms(),
            canned_reply: default_canned_reply(),
            assistant_name: default_assistant_name(),
            persona: default_persona(),
            theme: ThemeChoice::default(),
            tick_rate_ms: default_tick_rate_ms(),
            shorts_url: default_shorts_url(),
        }
    }
}

impl ChatConfig {
    /// Default config file location relative to `root`.
    pub fn default_path(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR).join(CONFIG_FILE)
    }

    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Load configuration, falling back to defaults if the file is missing.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).map_err(ConfigError::Parse),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(ConfigError::Io(e)),
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(ConfigError::Io)?;
        }
        std::fs::write(path, content).map_err(ConfigError::Io)
    }

    /// Reply delay as a [`Duration`].
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }

    /// Tick rate as a [`Duration`].
    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(1))
    }
}

/// Errors that can occur when working with configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// I/O error reading or writing config.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error parsing config JSON.
    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    /// Error serializing config to JSON.
    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),
}
