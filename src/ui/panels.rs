use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series visibility
// ---------------------------------------------------------------------------

/// Render the left panel: one show/hide checkbox per series.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    if state.table.is_empty() {
        ui.label("No series loaded.");
        return;
    }

    ui.horizontal(|ui: &mut Ui| {
        if ui.small_button("All").clicked() {
            state.show_all();
        }
        if ui.small_button("None").clicked() {
            state.hide_all();
        }
    });
    ui.separator();

    // Clone the names so we can mutate state inside the loop.
    let names: Vec<String> = state.table.names().map(String::from).collect();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for name in &names {
                let text = RichText::new(name).color(state.colors.color_for(name));
                let mut checked = state.is_visible(name);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_series(name);
                }
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{} series ({} shown), {} epochs",
            state.table.len(),
            state.visible_count(),
            state.table.max_len()
        ));

        ui.separator();

        if ui
            .selectable_label(state.show_zero_line, "Zero line")
            .clicked()
        {
            state.show_zero_line = !state.show_zero_line;
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open loss table")
        .add_filter("Supported files", &["json", "csv", "parquet", "pq"])
        .add_filter("JSON", &["json"])
        .add_filter("CSV", &["csv"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_table(&path) {
            Ok(table) => {
                log::info!("Loaded {} series from {}", table.len(), path.display());
                state.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
