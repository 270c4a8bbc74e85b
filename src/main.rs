mod app;
mod chart;
mod color;
mod data;
mod state;
mod ui;

use std::path::Path;

use app::GapvizApp;
use eframe::egui;
use state::AppState;

/// The dataset the dashboard historically ships next to; loaded at
/// startup when present.
const DEFAULT_SOURCE: &str = "gapminder.csv";

fn main() -> eframe::Result {
    env_logger::init();

    let mut state = AppState::default();

    let default_source = Path::new(DEFAULT_SOURCE);
    if default_source.exists() {
        match data::loader::load_path(default_source) {
            Ok(table) => {
                log::info!(
                    "Loaded {} records from {}",
                    table.len(),
                    default_source.display()
                );
                state.set_table(default_source.to_path_buf(), table);
            }
            Err(e) => {
                log::error!("Failed to load {}: {e}", default_source.display());
                state.status_message = Some(format!("Error: {e}"));
            }
        }
    } else {
        log::info!("No {DEFAULT_SOURCE} in the working directory; waiting for File → Open");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([700.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Gapviz – Gapminder Explorer",
        options,
        Box::new(move |_cc| Ok(Box::new(GapvizApp::new(state)))),
    )
}
