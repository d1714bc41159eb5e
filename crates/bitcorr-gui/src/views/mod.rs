//! Chart views

pub mod correlation;

pub use correlation::CorrelationView;
