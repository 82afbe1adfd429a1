//! Logging setup shared by portal front ends
//!
//! Settings are layered: the `[logging]` config section, then the
//! `PORTAL_LOG_FORMAT` / `PORTAL_LOG_LEVEL` environment variables, then
//! whatever the front end applies from its own flags. `RUST_LOG`, when set,
//! overrides the level entirely. Output always goes to stderr so it never
//! interleaves with the conversation on stdout.
//!
//! ```no_run
//! use libportal::config::LoggingSection;
//! use libportal::logging::{LogFormat, LogSettings};
//!
//! let mut settings = LogSettings::resolve(&LoggingSection::default(), false);
//! settings.format = LogFormat::Json;
//! settings.init();
//! ```

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSection;

pub const FORMAT_ENV: &str = "PORTAL_LOG_FORMAT";
pub const LEVEL_ENV: &str = "PORTAL_LOG_LEVEL";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Plain lines without colors
    #[default]
    Text,
    /// One JSON object per line
    Json,
    /// Multi-line, colored, with source locations
    Pretty,
}

impl LogFormat {
    pub const ALL: [LogFormat; 3] = [LogFormat::Text, LogFormat::Json, LogFormat::Pretty];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Text => "text",
            LogFormat::Json => "json",
            LogFormat::Pretty => "pretty",
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|format| format.as_str() == wanted)
            .ok_or_else(|| format!("Unknown log format '{}' (expected text, json or pretty)", s))
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolved logging settings for one process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub format: LogFormat,
    /// `EnvFilter` directive, e.g. "info" or "libportal=debug"
    pub level: String,
    /// Forces debug level unless `RUST_LOG` says otherwise
    pub verbose: bool,
}

impl LogSettings {
    /// Merge the config section with the environment
    ///
    /// An unparseable format falls back to text rather than failing startup.
    pub fn resolve(section: &LoggingSection, verbose: bool) -> Self {
        let format = std::env::var(FORMAT_ENV).unwrap_or_else(|_| section.format.clone());
        let format = format.parse().unwrap_or_else(|e: String| {
            eprintln!("Warning: {}; using text", e);
            LogFormat::Text
        });
        let level = std::env::var(LEVEL_ENV).unwrap_or_else(|_| section.level.clone());

        Self {
            format,
            level,
            verbose,
        }
    }

    fn filter(&self) -> EnvFilter {
        let fallback = if self.verbose { "debug" } else { self.level.as_str() };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }

    /// Install the global subscriber. Later calls are no-ops.
    pub fn init(&self) {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.filter())
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Text => builder.with_target(false).without_time().try_init(),
            LogFormat::Json => builder.json().flatten_event(true).try_init(),
            LogFormat::Pretty => builder
                .pretty()
                .with_file(true)
                .with_line_number(true)
                .try_init(),
        };

        if installed.is_err() {
            tracing::debug!("Global subscriber already set, keeping it");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        std::env::remove_var(FORMAT_ENV);
        std::env::remove_var(LEVEL_ENV);
    }

    #[test]
    fn test_format_names() {
        for format in LogFormat::ALL {
            assert_eq!(format.to_string().parse::<LogFormat>().unwrap(), format);
        }
        assert_eq!(" JSON ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().unwrap_err().contains("'xml'"));
    }

    #[test]
    #[serial]
    fn test_resolve_uses_section() {
        clear_env();
        let section = LoggingSection {
            format: "pretty".to_string(),
            level: "warn".to_string(),
        };

        let settings = LogSettings::resolve(&section, false);
        assert_eq!(settings.format, LogFormat::Pretty);
        assert_eq!(settings.level, "warn");
    }

    #[test]
    #[serial]
    fn test_environment_beats_section() {
        std::env::set_var(FORMAT_ENV, "json");
        std::env::set_var(LEVEL_ENV, "trace");

        let settings = LogSettings::resolve(&LoggingSection::default(), true);
        clear_env();

        assert_eq!(
            settings,
            LogSettings {
                format: LogFormat::Json,
                level: "trace".to_string(),
                verbose: true,
            }
        );
    }

    #[test]
    #[serial]
    fn test_unknown_format_falls_back_to_text() {
        clear_env();
        let section = LoggingSection {
            format: "xml".to_string(),
            level: "info".to_string(),
        };
        assert_eq!(LogSettings::resolve(&section, false).format, LogFormat::Text);
    }
}
