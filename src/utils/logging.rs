//! Logging configuration and subscriber setup

use std::io::IsTerminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{VidbatchError, VidbatchResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Default single-line text format
    #[default]
    Full,
    /// Compact text format
    Compact,
    /// Multi-line human-readable format
    Pretty,
    /// JSON format for structured logging
    Json,
}

/// Logging configuration options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `info` or `vidbatch=debug`
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Include target module information
    pub target: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Full,
            target: false,
        }
    }
}

impl LoggingConfig {
    /// Build the filter, letting `RUST_LOG` win over the configured level
    pub fn env_filter(&self) -> VidbatchResult<EnvFilter> {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|e| VidbatchError::Config {
            message: format!("invalid log level '{}': {}", self.level, e),
        })
    }

    /// Install the global subscriber. Logs go to stderr so stdout stays
    /// free for the JSON report.
    pub fn initialize(&self) -> VidbatchResult<()> {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(self.env_filter()?)
            .with_writer(std::io::stderr)
            .with_ansi(std::io::stderr().is_terminal())
            .with_target(self.target);

        let installed = match self.format {
            LogFormat::Full => builder.try_init(),
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };

        installed.map_err(|e| VidbatchError::Config {
            message: format!("failed to install log subscriber: {}", e),
        })?;

        tracing::debug!(level = %self.level, format = ?self.format, "Logging initialized");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_level_is_config_error() {
        if std::env::var_os("RUST_LOG").is_some() {
            return;
        }
        let config = LoggingConfig {
            level: "vidbatch=verbose".to_string(),
            ..LoggingConfig::default()
        };
        assert!(matches!(
            config.env_filter(),
            Err(VidbatchError::Config { .. })
        ));
    }

    #[test]
    fn test_default_level_parses() {
        assert!(LoggingConfig::default().env_filter().is_ok());
    }
}
