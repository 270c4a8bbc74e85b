use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

/// Three-panel shell: menu bar on top, mode controls on the left, tables
/// and charts in the center. Every frame rebuilds the filter and chart
/// requests from the current controls; only the loaded table persists.
pub struct GapvizApp {
    state: AppState,
}

impl GapvizApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for GapvizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        egui::SidePanel::left("controls_panel")
            .default_width(230.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            views::central_panel(ui, &mut self.state);
        });
    }
}
