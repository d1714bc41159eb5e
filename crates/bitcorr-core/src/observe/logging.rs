//! # Structured Logging
//!
//! Installs a `tracing_subscriber` registry with an [`EnvFilter`] and one
//! `fmt` layer in compact, pretty or JSON form. `RUST_LOG` takes precedence
//! over the configured level unless an explicit `filter` is given.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Log level configuration.
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
        let name = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One line per event
    #[default]
    Compact,
    /// Multi-line, colored
    Pretty,
    /// Machine-readable
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    pub format: LogFormat,
    /// Include file:line
    pub source_location: bool,
    /// Emit span enter/exit events
    pub span_events: bool,
    /// Directive string, e.g. "bitcorr_core=trace"
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Compact,
            source_location: false,
            span_events: false,
            filter: None,
        }
    }
}

impl LogConfig {
    /// Verbose, pretty, with span timing.
    pub fn development() -> Self {
        Self {
            level: LogLevel::Debug,
            format: LogFormat::Pretty,
            source_location: true,
            span_events: true,
            ..Default::default()
        }
    }

    /// Errors only.
    pub fn quiet() -> Self {
        Self {
            level: LogLevel::Error,
            ..Default::default()
        }
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.filter {
            Some(custom) => EnvFilter::try_new(custom)
                .unwrap_or_else(|_| EnvFilter::new(self.level.to_string())),
            None => EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.level.to_string())),
        }
    }
}

/// Initialize the global logging subscriber.
///
/// Call once at startup; later calls are ignored.
pub fn init_logging(config: &LogConfig) {
    let span_events = if config.span_events {
        fmt::format::FmtSpan::CLOSE
    } else {
        fmt::format::FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events);

    let registry = tracing_subscriber::registry().with(config.env_filter());
    let result = match config.format {
        LogFormat::Json => tracing::subscriber::set_global_default(registry.with(layer.json())),
        LogFormat::Pretty => tracing::subscriber::set_global_default(registry.with(layer.pretty())),
        LogFormat::Compact => {
            tracing::subscriber::set_global_default(registry.with(layer.compact()))
        }
    };

    // Already initialized
    let _ = result;
}
