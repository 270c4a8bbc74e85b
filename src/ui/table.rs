use eframe::egui::{Grid, Ui};
use egui_extras::{Column, TableBuilder};

use crate::chart::{SummaryArtifact, TableArtifact};
use crate::data::stats::NumericSummary;

// ---------------------------------------------------------------------------
// Data table
// ---------------------------------------------------------------------------

/// Draw a table artifact as a scrollable, virtualized grid.
pub fn data_table(ui: &mut Ui, art: &TableArtifact) {
    ui.strong(&art.title);
    ui.label(format!("{} rows", art.rows.len()));
    ui.add_space(4.0);

    TableBuilder::new(ui)
        .id_salt(&art.title)
        .striped(true)
        .resizable(true)
        .max_scroll_height(520.0)
        .columns(Column::auto().at_least(70.0), art.columns.len())
        .header(20.0, |mut header| {
            for col in &art.columns {
                header.col(|ui: &mut Ui| {
                    ui.strong(*col);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, art.rows.len(), |mut row| {
                for cell in &art.rows[row.index()] {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}

// ---------------------------------------------------------------------------
// Describe tables
// ---------------------------------------------------------------------------

/// Draw the numeric and categorical describe grids.
pub fn summary_tables(ui: &mut Ui, art: &SummaryArtifact) {
    ui.strong(&art.title);
    ui.add_space(4.0);

    Grid::new(("numeric_summary", &art.title))
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for s in &art.numeric {
                ui.strong(s.field.name());
            }
            ui.end_row();

            let stat_rows: [(&str, fn(&NumericSummary) -> Option<f64>); 8] = [
                ("count", |s| Some(s.count as f64)),
                ("mean", |s| s.mean),
                ("std", |s| s.std),
                ("min", |s| s.min),
                ("25%", |s| s.q25),
                ("50%", |s| s.median),
                ("75%", |s| s.q75),
                ("max", |s| s.max),
            ];
            for (name, stat) in stat_rows {
                ui.strong(name);
                for s in &art.numeric {
                    ui.label(format_stat(stat(s)));
                }
                ui.end_row();
            }
        });

    ui.add_space(8.0);

    Grid::new(("categorical_summary", &art.title))
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for s in &art.categorical {
                ui.strong(s.field.name());
            }
            ui.end_row();

            ui.strong("count");
            for s in &art.categorical {
                ui.label(s.count.to_string());
            }
            ui.end_row();

            ui.strong("unique");
            for s in &art.categorical {
                ui.label(s.unique.to_string());
            }
            ui.end_row();

            ui.strong("top");
            for s in &art.categorical {
                ui.label(s.top.clone().unwrap_or_else(|| "-".to_string()));
            }
            ui.end_row();

            ui.strong("freq");
            for s in &art.categorical {
                ui.label(s.freq.to_string());
            }
            ui.end_row();
        });
}

fn format_stat(value: Option<f64>) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if v.abs() >= 1e7 => format!("{v:.4e}"),
        Some(v) if v.fract().abs() < 1e-9 => format!("{v:.0}"),
        Some(v) => format!("{v:.3}"),
    }
}
