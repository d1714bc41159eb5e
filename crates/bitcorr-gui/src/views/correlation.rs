//! Three stacked line charts with fixed vertical ranges

use bitcorr_core::plot::PlotPanel;
use egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotBounds, PlotPoints};

const PANEL_COLORS: [Color32; 3] = [
    Color32::from_rgb(100, 200, 255),
    Color32::from_rgb(100, 255, 100),
    Color32::from_rgb(255, 180, 80),
];

/// Renders [`PlotPanel`]s top to bottom.
///
/// Zoom and drag are disabled and the bounds are set every frame, so the
/// vertical range is always the panel's own fixed range.
#[derive(Debug)]
pub struct CorrelationView {
    show_grid: bool,
}

impl CorrelationView {
    pub fn new() -> Self {
        Self { show_grid: true }
    }

    pub fn render(&mut self, ui: &mut Ui, panels: &[PlotPanel]) {
        ui.checkbox(&mut self.show_grid, "Grid");

        let count = panels.len().max(1) as f32;
        let spacing = ui.spacing().item_spacing.y;
        let height = ((ui.available_height() - spacing * count) / count).max(80.0);

        for (panel, &color) in panels.iter().zip(PANEL_COLORS.iter().cycle()) {
            self.render_panel(ui, panel, color, height);
        }
    }

    fn render_panel(&self, ui: &mut Ui, panel: &PlotPanel, color: Color32, height: f32) {
        let (x_min, x_max) = panel.x_extent();
        let x_max = if x_max > x_min { x_max } else { x_min + 1.0 };
        let (y_min, y_max) = panel.y_range;

        let plot = Plot::new(panel.id)
            .height(height)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .show_grid(self.show_grid)
            .include_y(y_min)
            .include_y(y_max)
            .x_axis_label(panel.x_label)
            .y_axis_label(panel.y_label);

        plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            let points: PlotPoints = panel.points.clone().into();
            plot_ui.line(Line::new(points).name(panel.title).color(color));
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcorr_core::Pipeline;

    #[test]
    fn test_render_headless() {
        let panels = Pipeline::default().run().unwrap().panels();
        let mut view = CorrelationView::new();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| view.render(ui, &panels));
        });
    }

    #[test]
    fn test_render_empty() {
        let mut view = CorrelationView::new();
        let ctx = egui::Context::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| view.render(ui, &[]));
        });
    }
}
