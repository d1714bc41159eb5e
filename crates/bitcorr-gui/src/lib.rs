//! bitcorr viewer library
//!
//! The eframe application and its chart view, split from `main.rs` so the
//! view can be embedded elsewhere.

pub mod app;
pub mod views;

pub use app::CorrelationExplorer;
