//! Configuration management for the portal

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ConfigError, Result};

/// Default delay before a canned reply lands in the thread
pub const DEFAULT_REPLY_DELAY: &str = "1500ms";

/// Default upper bound on a single message body, in characters
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 5000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub messaging: MessagingConfig,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MessagingConfig {
    /// Humantime duration string, e.g. "1500ms" or "2s"
    pub reply_delay: String,
    /// Sender label for the portal user's own messages
    pub user_label: String,
    /// Role given to contacts added without one
    pub default_role: String,
    pub max_message_chars: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    pub format: String,
    pub level: String,
}

impl Default for MessagingConfig {
    fn default() -> Self {
        Self {
            reply_delay: DEFAULT_REPLY_DELAY.to_string(),
            user_label: "You".to_string(),
            default_role: "Staff".to_string(),
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            level: "info".to_string(),
        }
    }
}

impl MessagingConfig {
    /// Parse `reply_delay` into a `Duration`
    pub fn reply_delay(&self) -> Result<Duration> {
        parse_delay(&self.reply_delay)
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// A missing file is not an error: the portal runs on defaults.
    pub fn load() -> Result<Self> {
        let config_path = resolve_config_path()?;
        if !config_path.exists() {
            tracing::debug!("No config at {}, using defaults", config_path.display());
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content).map_err(ConfigError::ParseError)?;
        // Surface a bad duration at load time rather than on first send
        config.messaging.reply_delay()?;
        Ok(config)
    }
}

/// Parse a humantime duration string such as "1500ms" or "2s"
pub fn parse_delay(value: &str) -> Result<Duration> {
    humantime::parse_duration(value.trim()).map_err(|e| {
        ConfigError::InvalidDuration {
            value: value.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

/// Resolve the configuration file path following XDG Base Directory spec
pub fn resolve_config_path() -> Result<PathBuf> {
    if let Ok(path) = std::env::var("PORTAL_CONFIG") {
        return Ok(PathBuf::from(shellexpand::tilde(&path).to_string()));
    }

    let config_dir = dirs::config_dir()
        .ok_or_else(|| ConfigError::MissingField("config directory".to_string()))?;

    Ok(config_dir.join("portal").join("config.toml"))
}
