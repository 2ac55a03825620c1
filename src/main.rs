mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::Context;
use app::LossViewerApp;
use clap::Parser;
use eframe::egui;

/// Plot training losses from a loss-table file.
#[derive(Parser)]
#[command(name = "trainviz")]
#[command(about = "Plot training losses from a JSON, CSV or Parquet file", long_about = None)]
struct Cli {
    /// Path to the file containing the losses
    #[arg(long, value_name = "PATH", default_value = "losses.json")]
    json: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    // The startup file is mandatory: a missing or malformed table aborts the
    // run. Once the window is up, File → Open failures only surface as a
    // status message and keep the current table.
    let table = data::loader::load_table(&cli.json)
        .with_context(|| format!("loading {}", cli.json.display()))?;
    log::info!("Loaded {} series from {}", table.len(), cli.json.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 600.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Training loss",
        options,
        Box::new(move |_cc| Ok(Box::new(LossViewerApp::new(table)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}
