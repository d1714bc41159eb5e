//! # Observability
//!
//! Structured logging for the pipeline via `tracing`. Stages emit `debug`
//! events inside spans carrying their sizes; binaries call
//! [`init_logging`] once at startup.
//!
//! ```rust,ignore
//! use bitcorr_core::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::default());
//! tracing::info!(samples = 200, "pipeline complete");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
