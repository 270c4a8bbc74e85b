use eframe::egui::{Color32, ScrollArea, Ui};

use crate::chart::{self, Artifact, ChartStyle, RenderError};
use crate::data::filter::{FilterSpec, InvalidSpecError};
use crate::data::model::GapminderTable;
use crate::state::{
    AppState, ExplorerControls, FitsControls, GalleryControls, InteractiveControls, ModeControls,
};

use super::{plot, table};

const WARN_COLOR: Color32 = Color32::from_rgb(0xC8, 0x7A, 0x00);

// ---------------------------------------------------------------------------
// Central panel – one view per mode
// ---------------------------------------------------------------------------

/// Render the central panel for the active mode.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    let Some(data) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a Gapminder CSV to start exploring  (File → Open…)");
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| match &state.mode {
            ModeControls::Explorer(controls) => explorer_view(ui, data, controls),
            ModeControls::Gallery(controls) => gallery_view(ui, data, controls),
            ModeControls::Interactive(controls) => interactive_view(ui, data, controls),
            ModeControls::Fits(controls) => fits_view(ui, data, controls),
        });
}

fn explorer_view(ui: &mut Ui, data: &GapminderTable, controls: &ExplorerControls) {
    ui.heading("Data loading & preprocessing");
    ui.add_space(6.0);

    match controls.filter_spec() {
        Ok(spec) => {
            for outcome in chart::evaluate(data, &spec, &controls.chart_specs()) {
                draw_outcome(ui, &outcome, ChartStyle::Default);
            }
        }
        Err(err) => spec_warning(ui, &err),
    }
}

fn gallery_view(ui: &mut Ui, data: &GapminderTable, controls: &GalleryControls) {
    ui.heading("Scatter, line & grouped plots");
    ui.add_space(6.0);

    match controls.filter_spec() {
        Ok(spec) => {
            for outcome in chart::evaluate(data, &spec, &controls.chart_specs()) {
                draw_outcome(ui, &outcome, controls.style);
            }
        }
        Err(err) => spec_warning(ui, &err),
    }
}

fn interactive_view(ui: &mut Ui, data: &GapminderTable, controls: &InteractiveControls) {
    ui.heading("Working with multiple interactive plots");
    ui.add_space(6.0);

    let year_outcomes = chart::evaluate(data, &controls.filter_spec(), &controls.year_chart_specs());
    // The trajectory panel follows countries across all years, so it gets
    // its own unfiltered pass.
    let trajectory = chart::evaluate(data, &FilterSpec::All, &[controls.trajectory_chart_spec()]);

    ui.columns(2, |columns: &mut [Ui]| {
        draw_outcome(&mut columns[0], &year_outcomes[0], controls.style);
        draw_outcome(&mut columns[1], &trajectory[0], controls.style);
    });
    draw_outcome(ui, &year_outcomes[1], controls.style);
}

fn fits_view(ui: &mut Ui, data: &GapminderTable, controls: &FitsControls) {
    ui.heading("Regression fits on GDP vs life expectancy");
    ui.add_space(6.0);

    for outcome in chart::evaluate(data, &controls.filter_spec(), &controls.chart_specs()) {
        draw_outcome(ui, &outcome, ChartStyle::Default);
    }
}

// ---------------------------------------------------------------------------
// Artifact drawing
// ---------------------------------------------------------------------------

/// Draw a rendered panel, or its warning when the request was skipped.
/// A failed panel never hides its siblings.
fn draw_outcome(ui: &mut Ui, outcome: &Result<Artifact, RenderError>, style: ChartStyle) {
    match outcome {
        Ok(artifact) => draw_artifact(ui, artifact, style),
        Err(err) => {
            log::warn!("Panel skipped: {err}");
            ui.colored_label(WARN_COLOR, format!("Panel skipped: {err}"));
        }
    }
}

fn draw_artifact(ui: &mut Ui, artifact: &Artifact, style: ChartStyle) {
    match artifact {
        Artifact::Table(art) => table::data_table(ui, art),
        Artifact::Summary(art) => table::summary_tables(ui, art),
        Artifact::Scatter(art) => plot::scatter_plot(ui, art, style),
        Artifact::Line(art) => plot::line_plot(ui, art, style),
        Artifact::Distribution(art) => plot::distribution_plot(ui, art, style),
        Artifact::Panels(halves) => {
            ui.columns(2, |columns: &mut [Ui]| {
                for (i, half) in halves.iter().take(2).enumerate() {
                    draw_outcome(&mut columns[i], half, style);
                }
            });
        }
    }
    ui.add_space(12.0);
}

fn spec_warning(ui: &mut Ui, err: &InvalidSpecError) {
    log::warn!("Rejected control input: {err}");
    ui.colored_label(WARN_COLOR, format!("Invalid selection: {err}"));
}
