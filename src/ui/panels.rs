use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::chart::{AxisScale, ChartStyle};
use crate::data::model::{GapminderTable, YEAR_MAX, YEAR_MIN, YEAR_STEP};
use crate::state::{
    AppState, ExplorerControls, FitsControls, GalleryControls, InteractiveControls, ModeControls,
    ModeKind,
};

// ---------------------------------------------------------------------------
// Left side panel – mode selector and per-mode controls
// ---------------------------------------------------------------------------

/// Render the sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Mode selector ----
    let current = state.mode.kind();
    for kind in ModeKind::ALL {
        if ui.radio(current == kind, kind.label()).clicked() && current != kind {
            state.mode = ModeControls::new(kind, state.table.as_ref());
        }
    }
    ui.separator();

    let AppState { table, mode, .. } = state;
    let Some(table) = table.as_ref() else {
        ui.label("No dataset loaded.");
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match mode {
            ModeControls::Explorer(controls) => explorer_controls(ui, table, controls),
            ModeControls::Gallery(controls) => gallery_controls(ui, table, controls),
            ModeControls::Interactive(controls) => interactive_controls(ui, controls),
            ModeControls::Fits(controls) => fits_controls(ui, controls),
        });
}

fn explorer_controls(ui: &mut Ui, table: &GapminderTable, controls: &mut ExplorerControls) {
    ui.strong("Data selection");
    ui.checkbox(&mut controls.filter_enabled, "Filter dataframe");
    if !controls.filter_enabled {
        return;
    }

    ui.add_space(4.0);
    ui.label("Filter on year & continent");
    year_slider(ui, &mut controls.year);
    for continent in &table.continents {
        ui.radio_value(&mut controls.continent, continent.clone(), continent);
    }

    ui.add_space(4.0);
    ui.label("Filter on country");
    country_multiselect(ui, "explorer_countries", &table.countries, &mut controls.countries);
}

fn gallery_controls(ui: &mut Ui, table: &GapminderTable, controls: &mut GalleryControls) {
    ui.strong("Data selection");
    ui.checkbox(&mut controls.filter_enabled, "Filter dataframe");
    if controls.filter_enabled {
        ui.add_space(4.0);
        ui.label("Filter on year & country");
        year_slider(ui, &mut controls.year);
        country_multiselect(ui, "gallery_countries", &table.countries, &mut controls.countries);
        ui.small("All countries assumed when no country selected.");
    }

    ui.separator();
    ui.strong("Plot options");
    style_toggle(ui, &mut controls.style);
}

fn interactive_controls(ui: &mut Ui, controls: &mut InteractiveControls) {
    ui.strong("Plot & data options");
    style_toggle(ui, &mut controls.style);

    ui.add_space(4.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.color_edit_button_srgba(&mut controls.marker_color);
        ui.label("Marker color");
    });
    ui.horizontal(|ui: &mut Ui| {
        ui.color_edit_button_srgba(&mut controls.marker_edge_color);
        ui.label("Marker edge color");
    });

    ui.add_space(4.0);
    year_slider(ui, &mut controls.year);

    ui.add_space(4.0);
    ui.label("X-axis scale");
    ui.radio_value(&mut controls.x_scale, AxisScale::Linear, "Linear");
    ui.radio_value(&mut controls.x_scale, AxisScale::Log, "Logarithmic");
}

fn fits_controls(ui: &mut Ui, controls: &mut FitsControls) {
    ui.strong("Data selection");
    year_slider(ui, &mut controls.year);
}

// ---------------------------------------------------------------------------
// Shared widgets
// ---------------------------------------------------------------------------

fn year_slider(ui: &mut Ui, year: &mut u16) {
    ui.add(
        egui::Slider::new(year, YEAR_MIN..=YEAR_MAX)
            .step_by(f64::from(YEAR_STEP))
            .text("Year"),
    );
}

fn style_toggle(ui: &mut Ui, style: &mut ChartStyle) {
    let mut alternate = *style == ChartStyle::Alternate;
    if ui.checkbox(&mut alternate, "Alternate stylesheet").changed() {
        *style = if alternate {
            ChartStyle::Alternate
        } else {
            ChartStyle::Default
        };
    }
}

/// Collapsible country multi-select with All/None shortcuts. An empty
/// selection is a valid state; each mode decides what it falls back to.
fn country_multiselect(
    ui: &mut Ui,
    id: &str,
    all: &[String],
    selected: &mut BTreeSet<String>,
) {
    let header = format!("Country  ({}/{})", selected.len(), all.len());
    egui::CollapsingHeader::new(RichText::new(header).strong())
        .id_salt(id)
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    selected.extend(all.iter().cloned());
                }
                if ui.small_button("None").clicked() {
                    selected.clear();
                }
            });

            ScrollArea::vertical()
                .id_salt((id, "country_list"))
                .max_height(260.0)
                .show(ui, |ui: &mut Ui| {
                    for name in all {
                        let mut checked = selected.contains(name);
                        if ui.checkbox(&mut checked, name).changed() {
                            if checked {
                                selected.insert(name.clone());
                            } else {
                                selected.remove(name);
                            }
                        }
                    }
                });
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

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows · {} countries · {} years",
                table.len(),
                table.countries.len(),
                table.years.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open Gapminder data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        // The table is loaded once per source; picking the same file
        // again keeps the cached copy.
        if state.source.as_deref() == Some(path.as_path()) {
            log::debug!("'{}' already loaded, keeping cached table", path.display());
            return;
        }

        state.loading = true;
        match crate::data::loader::load_path(&path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} records ({} countries, {} years)",
                    table.len(),
                    table.countries.len(),
                    table.years.len()
                );
                state.set_table(path, table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                state.status_message = Some(format!("Error: {e}"));
                state.loading = false;
            }
        }
    }
}
