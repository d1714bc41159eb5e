//! Estimate the pitch of a synthesized three-harmonic tone.
//!
//! Run with: cargo run -p bitcorr-core --example pitch_estimate
//!
//! Reads the usual config search path, so `BITCORR_CONFIG=tone.yaml` can
//! change the frequency, sample rate or noise level.

use bitcorr_core::observe::init_logging;
use bitcorr_core::{AppConfig, Pipeline};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_logging(&config.logging);

    let report = Pipeline::new(config).run_pitch()?;

    println!("Actual Frequency: {} Hz", report.actual_hz);
    println!("Estimated Frequency: {:.4} Hz", report.estimated_hz);
    println!("Error: {:.4} cents", report.cents);
    Ok(())
}
