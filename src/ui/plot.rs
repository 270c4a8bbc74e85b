use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, Legend, Line, LineStyle, MarkerShape, Plot, PlotPoint, Points, Text,
};

use crate::chart::{ChartStyle, DistributionArtifact, LineArtifact, MarkerPoint, ScatterArtifact};
use crate::color::{style_palette, ColorMap};

const PLOT_HEIGHT: f32 = 300.0;

// ---------------------------------------------------------------------------
// Scatter charts
// ---------------------------------------------------------------------------

/// Draw a scatter artifact: one marker group per legend entry, optional
/// edge layer, overlay curve, and pinned annotations.
pub fn scatter_plot(ui: &mut Ui, art: &ScatterArtifact, style: ChartStyle) {
    if !art.title.is_empty() {
        ui.strong(&art.title);
    }

    let palette = style_palette(style);
    let names: Vec<&str> = art.groups.iter().filter_map(|g| g.name.as_deref()).collect();
    let colors = ColorMap::new(names, style);

    let log_x = art.log_x;
    let mut plot = Plot::new(("scatter", &art.title))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(art.x_label)
        .y_axis_label(art.y_label);

    if log_x {
        // Markers are placed at log10(x); ticks show the original value.
        plot = plot.x_axis_formatter(|mark, _range| log_tick_label(mark.value));
    } else if let Some((lo, hi)) = art.x_bounds {
        plot = plot.include_x(lo).include_x(hi);
    }
    if let Some((lo, hi)) = art.y_bounds {
        plot = plot.include_y(lo).include_y(hi);
    }

    plot.show(ui, |plot_ui| {
        for group in &art.groups {
            let color = match &group.name {
                Some(name) => colors.color_for(name),
                None => art.fill.unwrap_or(palette[0]),
            };

            if group.connect && group.points.len() > 1 {
                let path: Vec<[f64; 2]> = group
                    .points
                    .iter()
                    .map(|p| [x_coord(log_x, p.x), p.y])
                    .collect();
                plot_ui.line(Line::new(path).color(color.gamma_multiply(0.5)).width(1.0));
            }

            // One batch per radius keeps the draw-call count low without
            // flattening the size encoding.
            for (radius, points) in by_radius(&group.points) {
                let xy: Vec<[f64; 2]> = points
                    .iter()
                    .map(|p| [x_coord(log_x, p.x), p.y])
                    .collect();

                if let Some(edge) = art.edge {
                    plot_ui.points(
                        Points::new(xy.clone())
                            .shape(MarkerShape::Circle)
                            .radius(radius + 1.5)
                            .color(edge),
                    );
                }

                let mut marks = Points::new(xy)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius)
                    .color(color);
                if let Some(name) = &group.name {
                    marks = marks.name(name);
                }
                plot_ui.points(marks);
            }
        }

        if let Some(curve) = &art.overlay {
            let path: Vec<[f64; 2]> = curve
                .points
                .iter()
                .map(|p| [x_coord(log_x, p[0]), p[1]])
                .collect();
            plot_ui.line(
                Line::new(path)
                    .color(palette[3])
                    .width(1.5)
                    .style(LineStyle::Dashed { length: 10.0 }),
            );
        }

        for note in &art.notes {
            plot_ui.text(Text::new(
                PlotPoint::new(x_coord(log_x, note.x), note.y),
                RichText::new(&note.text).size(10.0).color(Color32::GRAY),
            ));
        }
    });
}

/// Partition markers into runs sharing a radius, preserving order.
fn by_radius(points: &[MarkerPoint]) -> Vec<(f32, Vec<MarkerPoint>)> {
    let mut batches: Vec<(f32, Vec<MarkerPoint>)> = Vec::new();
    for &p in points {
        match batches.iter_mut().find(|(r, _)| *r == p.radius) {
            Some((_, batch)) => batch.push(p),
            None => batches.push((p.radius, vec![p])),
        }
    }
    batches
}

fn x_coord(log_x: bool, x: f64) -> f64 {
    if log_x {
        x.max(f64::MIN_POSITIVE).log10()
    } else {
        x
    }
}

fn log_tick_label(log_value: f64) -> String {
    let value = 10f64.powf(log_value);
    if value >= 1_000.0 {
        format!("{:.0}k", value / 1_000.0)
    } else if value >= 1.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

// ---------------------------------------------------------------------------
// Line charts
// ---------------------------------------------------------------------------

/// Draw a line artifact with one legend entry per series.
pub fn line_plot(ui: &mut Ui, art: &LineArtifact, style: ChartStyle) {
    if !art.title.is_empty() {
        ui.strong(&art.title);
    }

    let colors = ColorMap::new(art.series.iter().map(|s| s.name.as_str()), style);

    Plot::new(("line", &art.title))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(art.x_label)
        .y_axis_label(art.y_label)
        .show(ui, |plot_ui| {
            for series in &art.series {
                plot_ui.line(
                    Line::new(series.points.clone())
                        .name(&series.name)
                        .color(colors.color_for(&series.name))
                        .width(1.5),
                );
            }
        });
}

// ---------------------------------------------------------------------------
// Distribution charts
// ---------------------------------------------------------------------------

/// Draw a distribution artifact: histogram bars, density curves, or both.
pub fn distribution_plot(ui: &mut Ui, art: &DistributionArtifact, style: ChartStyle) {
    if !art.title.is_empty() {
        ui.strong(&art.title);
    }

    let palette = style_palette(style);
    let names: Vec<&str> = art
        .curves
        .iter()
        .filter(|c| !c.name.is_empty())
        .map(|c| c.name.as_str())
        .collect();
    let colors = ColorMap::new(names, style);

    let mut plot = Plot::new(("distribution", &art.title))
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(art.x_label);
    if let Some((lo, hi)) = art.x_bounds {
        plot = plot.include_x(lo).include_x(hi);
    }

    plot.show(ui, |plot_ui| {
        if !art.bars.is_empty() {
            let bars: Vec<Bar> = art
                .bars
                .iter()
                .map(|b| Bar::new(b.center, b.count).width(b.width * 0.95))
                .collect();
            plot_ui.bar_chart(BarChart::new(bars).color(palette[0].gamma_multiply(0.6)));
        }

        for curve in &art.curves {
            let color = if curve.name.is_empty() {
                palette[0]
            } else {
                colors.color_for(&curve.name)
            };
            let mut line = Line::new(curve.points.clone()).color(color).width(1.5);
            if !curve.name.is_empty() {
                line = line.name(&curve.name);
            }
            plot_ui.line(line);
        }
    });
}
