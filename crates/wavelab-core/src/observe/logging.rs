//! Structured logging configuration
//!
//! A thin, serializable wrapper over `tracing-subscriber`: pick a level and
//! an output format, call [`init_logging`] once at startup. The `RUST_LOG`
//! environment variable, when set, overrides the configured level with a
//! full filter expression (e.g. `wavelab_core=debug`).

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(s)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable JSON, one event per line
    Json,
    /// Human-readable, colored
    #[default]
    Pretty,
    /// Minimal single-line events
    Compact,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum level to emit
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
    /// Include source file and line in events
    pub source_location: bool,
    /// Explicit filter expression; overrides `level` when set
    pub filter: Option<String>,
}

impl LogConfig {
    /// Verbose development preset.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            filter: None,
        }
    }

    /// Errors-only preset for batch runs.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            format: LogFormat::Compact,
            source_location: false,
            filter: None,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Call once at startup; later calls are silently ignored so tests and
/// embedders can race without panicking.
pub fn init_logging(config: &LogConfig) {
    let filter = match &config.filter {
        Some(expr) => {
            EnvFilter::try_new(expr).unwrap_or_else(|_| EnvFilter::new(config.level.to_string()))
        }
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.to_string())),
    };

    let result = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .json()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            ),
        ),
        LogFormat::Pretty => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .pretty()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            ),
        ),
        LogFormat::Compact => tracing::subscriber::set_global_default(
            tracing_subscriber::registry().with(filter).with(
                fmt::layer()
                    .compact()
                    .with_file(config.source_location)
                    .with_line_number(config.source_location),
            ),
        ),
    };

    // A subscriber set earlier wins
    let _ = result;
}
