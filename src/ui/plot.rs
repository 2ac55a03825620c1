use eframe::egui::{Color32, Ui};
use egui_plot::{HLine, Legend, Line, Plot, PlotPoints};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Loss curves (central panel)
// ---------------------------------------------------------------------------

/// Render every visible loss series as a line against its epoch index.
pub fn loss_plot(ui: &mut Ui, state: &AppState) {
    if state.table.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("No series in the loaded file  (File → Open…)");
        });
        return;
    }

    Plot::new("loss_plot")
        .legend(Legend::default())
        .x_axis_label("Epoch")
        .y_axis_label("Loss")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if state.show_zero_line {
                plot_ui.hline(HLine::new(0.0).color(Color32::DARK_GREEN).width(0.5));
            }

            for series in &state.table.series {
                if !state.is_visible(&series.name) {
                    continue;
                }

                // A length-0 series draws an empty line; it still gets a
                // legend entry and never disturbs its neighbours.
                let points: PlotPoints = series
                    .values
                    .iter()
                    .enumerate()
                    .map(|(epoch, &loss)| [epoch as f64, loss])
                    .collect();

                let line = Line::new(points)
                    .name(&series.name)
                    .color(state.colors.color_for(&series.name))
                    .width(1.5);

                plot_ui.line(line);
            }
        });
}
