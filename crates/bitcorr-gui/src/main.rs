//! bitcorr viewer (native entry point)
//!
//! Shows the synthesized signal, its hysteresis trigger and the shift
//! Hamming profile as three stacked charts.

use bitcorr_core::observe::init_logging;
use bitcorr_core::AppConfig;
use bitcorr_gui::CorrelationExplorer;

fn main() -> eframe::Result<()> {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("bitcorr: {e}");
            std::process::exit(2);
        }
    };
    init_logging(&config.logging);
    tracing::info!("starting viewer");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 900.0])
            .with_min_inner_size([480.0, 540.0])
            .with_title("bitcorr - Zero-Crossing Shift Profile"),
        ..Default::default()
    };

    eframe::run_native(
        "bitcorr",
        native_options,
        Box::new(|_cc| Ok(Box::new(CorrelationExplorer::new(config)))),
    )
}
