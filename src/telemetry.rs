//! # Telemetry Module
//!
//! Structured logging setup for hosts and the demo binary.
//!
//! The library itself only emits `tracing` events and never installs a
//! subscriber; that choice belongs to the application. Hosts that do not already
//! have a subscriber call [`init_logging`] once at process start.
//!
//! ## Environment Variables
//!
//! - `BINDERY_LOG_LEVEL`: default filter level (`trace`/`debug`/`info`/`warn`/
//!   `error`, default `info`). `RUST_LOG` takes precedence when set.
//! - `BINDERY_LOG_FORMAT`: `json` (default) or `pretty`.

use std::env;

use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json, // Default to JSON
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Log level: trace/debug/info/warn/error
    pub log_level: String,
    /// Log format: json/pretty
    pub format: LogFormat,
}

impl LogConfig {
    /// Parse configuration from environment variables with defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            log_level: env::var("BINDERY_LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            format: LogFormat::parse(
                &env::var("BINDERY_LOG_FORMAT").unwrap_or_else(|_| "json".to_string()),
            ),
        }
    }

    /// Development configuration: everything, human-readable
    #[must_use]
    pub fn default_dev() -> Self {
        Self {
            log_level: "debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Install the global tracing subscriber from environment configuration.
///
/// Fails if a subscriber is already installed.
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with_config(&LogConfig::from_env())
}

/// Install the global tracing subscriber with an explicit configuration.
pub fn init_logging_with_config(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    match config.format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .try_init(),
        LogFormat::Pretty => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init(),
    }
    .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_format_parsing() {
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("JSON"), LogFormat::Json);
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("invalid"), LogFormat::Json); // Default
    }

    #[test]
    fn default_dev_is_pretty_debug() {
        let config = LogConfig::default_dev();
        assert_eq!(config.format, LogFormat::Pretty);
        assert_eq!(config.log_level, "debug");
    }
}
