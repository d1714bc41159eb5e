//! Top-level eframe application

use bitcorr_core::plot::PlotPanel;
use bitcorr_core::{AppConfig, Pipeline, PitchReport};
use egui::{Color32, RichText};

use crate::views::CorrelationView;

/// Viewer state: the last pipeline run and its panels.
pub struct CorrelationExplorer {
    pipeline: Pipeline,
    panels: Vec<PlotPanel>,
    best_lag: Option<usize>,
    pitch: Option<PitchReport>,
    error: Option<String>,
    view: CorrelationView,
}

impl CorrelationExplorer {
    pub fn new(config: AppConfig) -> Self {
        let mut app = Self {
            pipeline: Pipeline::new(config),
            panels: Vec::new(),
            best_lag: None,
            pitch: None,
            error: None,
            view: CorrelationView::new(),
        };
        app.recompute();
        app
    }

    /// Re-run the pipeline and the pitch scenario.
    fn recompute(&mut self) {
        match self.pipeline.run() {
            Ok(output) => {
                self.best_lag = output.profile.best_lag();
                self.panels = output.panels().to_vec();
                self.error = None;
                tracing::debug!(samples = output.signal.len(), "panels rebuilt");
            }
            Err(e) => {
                tracing::error!(error = %e, "pipeline failed");
                self.panels.clear();
                self.best_lag = None;
                self.error = Some(e.to_string());
            }
        }

        self.pitch = match self.pipeline.run_pitch() {
            Ok(report) => Some(report),
            Err(e) => {
                tracing::warn!(error = %e, "pitch estimate failed");
                None
            }
        };
    }

    /// Reload the config file and recompute.
    fn reload(&mut self) {
        match AppConfig::load() {
            Ok(config) => {
                self.pipeline = Pipeline::new(config);
                self.recompute();
            }
            Err(e) => {
                tracing::error!(error = %e, "config reload failed");
                self.error = Some(e.to_string());
            }
        }
    }

    fn render_status(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui.button("Reload config").clicked() {
                self.reload();
            }
            ui.separator();

            let samples = self.panels.first().map_or(0, |p| p.points.len());
            ui.label(format!("Samples: {}", samples));
            if let Some(lag) = self.best_lag {
                ui.label(format!("Best lag: {}", lag));
            }
            if let Some(report) = &self.pitch {
                ui.separator();
                ui.label(format!(
                    "Pitch: {:.2} Hz (actual {:.2} Hz, {:+.3} cents)",
                    report.estimated_hz, report.actual_hz, report.cents
                ));
            }
        });

        if let Some(err) = &self.error {
            ui.colored_label(Color32::RED, RichText::new(err).strong());
        }
    }
}

impl eframe::App for CorrelationExplorer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("status").show(ctx, |ui| {
            self.render_status(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.view.render(ui, &self.panels);
        });
    }
}
