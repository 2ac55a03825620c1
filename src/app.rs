use eframe::egui;

use crate::data::model::LossTable;
use crate::state::AppState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LossViewerApp {
    pub state: AppState,
}

impl LossViewerApp {
    pub fn new(table: LossTable) -> Self {
        Self {
            state: AppState::new(table),
        }
    }
}

impl eframe::App for LossViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: series visibility ----
        egui::SidePanel::left("series_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: loss curves ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::loss_plot(ui, &self.state);
        });
    }
}
