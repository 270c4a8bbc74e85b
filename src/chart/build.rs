//! Builders turning a filtered view plus a chart request into artifact
//! data. Everything here is pure; the `ui` layer does the drawing.

use crate::data::filter::View;
use crate::data::model::{Field, GapminderTable, Record, REQUIRED_COLUMNS};
use crate::data::stats;

use super::fit;
use super::{
    AxisScale, CurveSeries, DistributionArtifact, DistributionSpec, HistBar, LineArtifact,
    LineSpec, MarkerPoint, Overlay, RenderError, ScatterArtifact, ScatterGroup, ScatterSpec,
    SummaryArtifact, TableArtifact,
};

/// Marker radius when no size encoding is declared.
const DEFAULT_RADIUS: f32 = 2.5;
/// Radius range the size encoding maps onto.
const SIZE_RADIUS: (f32, f32) = (2.0, 8.0);
/// Sample count for fitted overlay curves and density grids.
const CURVE_SAMPLES: usize = 100;
const KDE_SAMPLES: usize = 200;

// ---------------------------------------------------------------------------
// Tabular builders
// ---------------------------------------------------------------------------

pub(super) fn table(table: &GapminderTable, view: &View, title: &str) -> TableArtifact {
    let rows = view
        .rows(table)
        .map(|rec| Field::ALL.iter().map(|f| f.display_value(rec)).collect())
        .collect();
    TableArtifact {
        title: title.to_string(),
        columns: REQUIRED_COLUMNS.to_vec(),
        rows,
    }
}

pub(super) fn summary(table: &GapminderTable, view: &View, title: &str) -> SummaryArtifact {
    SummaryArtifact {
        title: title.to_string(),
        numeric: stats::describe_numeric(table, view),
        categorical: stats::describe_categorical(table, view),
    }
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

pub(super) fn scatter(
    table: &GapminderTable,
    view: &View,
    spec: &ScatterSpec,
) -> Result<ScatterArtifact, RenderError> {
    require_numeric(spec.x)?;
    require_numeric(spec.y)?;
    if let Some(field) = spec.size_by {
        require_numeric(field)?;
    }
    if let Some(field) = spec.group_by {
        require_categorical(field)?;
    }

    // Size encoding is normalized over the whole view, not per group, so
    // marker areas stay comparable across legend entries.
    let size_range = spec.size_by.map(|field| {
        view.rows(table)
            .filter_map(|r| field.numeric_value(r))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            })
    });
    let radius_for = |record: &Record| -> f32 {
        match (spec.size_by, size_range) {
            (Some(field), Some((lo, hi))) if hi > lo => {
                let v = field.numeric_value(record).unwrap_or(lo);
                let t = ((v - lo) / (hi - lo)) as f32;
                SIZE_RADIUS.0 + t * (SIZE_RADIUS.1 - SIZE_RADIUS.0)
            }
            _ => DEFAULT_RADIUS,
        }
    };

    let marker = |record: &Record| -> Option<MarkerPoint> {
        Some(MarkerPoint {
            x: spec.x.numeric_value(record)?,
            y: spec.y.numeric_value(record)?,
            radius: radius_for(record),
        })
    };

    let groups = match spec.group_by {
        None => vec![ScatterGroup {
            name: None,
            points: view.rows(table).filter_map(marker).collect(),
            connect: spec.connect,
        }],
        Some(group_field) => {
            let names = match &spec.groups {
                Some(names) => names.clone(),
                None => group_values(table, view, group_field),
            };
            names
                .into_iter()
                .map(|name| ScatterGroup {
                    points: view
                        .rows(table)
                        .filter(|r| group_field.text_value(r) == Some(name.as_str()))
                        .filter_map(marker)
                        .collect(),
                    name: Some(name),
                    connect: spec.connect,
                })
                .collect()
        }
    };

    let xy: Vec<[f64; 2]> = view
        .rows(table)
        .filter_map(|r| Some([spec.x.numeric_value(r)?, spec.y.numeric_value(r)?]))
        .collect();
    let overlay = spec.overlay.as_ref().and_then(|o| overlay_series(o, &xy));

    Ok(ScatterArtifact {
        title: spec.title.clone(),
        x_label: spec.x.label(),
        y_label: spec.y.label(),
        log_x: spec.x_scale == AxisScale::Log,
        groups,
        overlay,
        fill: spec.fill,
        edge: spec.edge,
        notes: spec.notes.clone(),
        x_bounds: spec.x_bounds,
        y_bounds: spec.y_bounds,
    })
}

fn overlay_series(overlay: &Overlay, points: &[[f64; 2]]) -> Option<CurveSeries> {
    match overlay {
        // Sampled over the same 1..=50000 range the reference curve was
        // defined on, independent of the data.
        Overlay::Curve { intercept, slope } => Some(CurveSeries {
            name: String::new(),
            points: linspace(1.0, 50_000.0, 50)
                .into_iter()
                .map(|x| [x, intercept + slope * x.ln()])
                .collect(),
        }),
        Overlay::LogFit => {
            let (a, b) = fit::log_fit(points)?;
            let (lo, hi) = positive_x_range(points)?;
            Some(CurveSeries {
                name: String::new(),
                points: linspace(lo, hi, CURVE_SAMPLES)
                    .into_iter()
                    .map(|x| [x, a + b * x.ln()])
                    .collect(),
            })
        }
        Overlay::PolyFit { degree } => {
            let coeffs = fit::poly_fit(points, *degree)?;
            let (lo, hi) = x_range(points)?;
            Some(CurveSeries {
                name: String::new(),
                points: linspace(lo, hi, CURVE_SAMPLES)
                    .into_iter()
                    .map(|x| {
                        let y = coeffs
                            .iter()
                            .enumerate()
                            .map(|(k, c)| c * x.powi(k as i32))
                            .sum();
                        [x, y]
                    })
                    .collect(),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

pub(super) fn line(
    table: &GapminderTable,
    view: &View,
    spec: &LineSpec,
) -> Result<LineArtifact, RenderError> {
    require_numeric(spec.x)?;
    require_numeric(spec.y)?;
    require_categorical(spec.group_by)?;

    let names = match &spec.groups {
        Some(names) => names.clone(),
        None => group_values(table, view, spec.group_by),
    };

    let series = names
        .into_iter()
        .map(|name| CurveSeries {
            points: view
                .rows(table)
                .filter(|r| spec.group_by.text_value(r) == Some(name.as_str()))
                .filter_map(|r| Some([spec.x.numeric_value(r)?, spec.y.numeric_value(r)?]))
                .collect(),
            name,
        })
        .collect();

    Ok(LineArtifact {
        title: spec.title.clone(),
        x_label: spec.x.label(),
        y_label: spec.y.label(),
        series,
    })
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

pub(super) fn distribution(
    table: &GapminderTable,
    view: &View,
    spec: &DistributionSpec,
) -> Result<DistributionArtifact, RenderError> {
    require_numeric(spec.field)?;
    if let Some(field) = spec.group_by {
        require_categorical(field)?;
    }

    let values: Vec<f64> = view
        .rows(table)
        .filter_map(|r| spec.field.numeric_value(r))
        .collect();

    let bars: Vec<HistBar> = if spec.histogram {
        fit::histogram(&values, spec.bins)
            .into_iter()
            .map(|(center, width, count)| HistBar {
                center,
                width,
                count: count as f64,
            })
            .collect()
    } else {
        Vec::new()
    };

    let mut curves = Vec::new();
    if spec.density && !values.is_empty() {
        let grid = density_grid(&values, spec.x_bounds);
        match spec.group_by {
            None => {
                if let Some(density) = fit::gaussian_kde(&values, &grid) {
                    // Over a histogram the curve is scaled to counts so the
                    // two share one y-axis.
                    let scale = match bars.first() {
                        Some(bar) if spec.histogram => values.len() as f64 * bar.width,
                        _ => 1.0,
                    };
                    curves.push(CurveSeries {
                        name: String::new(),
                        points: grid
                            .iter()
                            .zip(&density)
                            .map(|(&x, &d)| [x, d * scale])
                            .collect(),
                    });
                }
            }
            Some(group_field) => {
                for name in group_values(table, view, group_field) {
                    let member_values: Vec<f64> = view
                        .rows(table)
                        .filter(|r| group_field.text_value(r) == Some(name.as_str()))
                        .filter_map(|r| spec.field.numeric_value(r))
                        .collect();
                    if let Some(density) = fit::gaussian_kde(&member_values, &grid) {
                        curves.push(CurveSeries {
                            name,
                            points: grid.iter().zip(&density).map(|(&x, &d)| [x, d]).collect(),
                        });
                    }
                }
            }
        }
    }

    Ok(DistributionArtifact {
        title: spec.title.clone(),
        x_label: spec.field.label(),
        bars,
        curves,
        x_bounds: spec.x_bounds,
    })
}

fn density_grid(values: &[f64], bounds: Option<(f64, f64)>) -> Vec<f64> {
    let (lo, hi) = bounds.unwrap_or_else(|| {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let pad = (hi - lo).max(1.0) * 0.1;
        (lo - pad, hi + pad)
    });
    linspace(lo, hi, KDE_SAMPLES)
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

fn require_numeric(field: Field) -> Result<(), RenderError> {
    if Field::NUMERIC.contains(&field) {
        Ok(())
    } else {
        Err(RenderError::NonNumericField(field.name()))
    }
}

fn require_categorical(field: Field) -> Result<(), RenderError> {
    if Field::CATEGORICAL.contains(&field) {
        Ok(())
    } else {
        Err(RenderError::NonCategoricalField(field.name()))
    }
}

/// Unique values of a categorical field in view order.
fn group_values(table: &GapminderTable, view: &View, field: Field) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for rec in view.rows(table) {
        if let Some(value) = field.text_value(rec) {
            if !names.iter().any(|n| n == value) {
                names.push(value.to_string());
            }
        }
    }
    names
}

fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    if n < 2 {
        return vec![lo];
    }
    let step = (hi - lo) / (n - 1) as f64;
    (0..n).map(|i| lo + step * i as f64).collect()
}

fn x_range(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    let lo = points.iter().map(|p| p[0]).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p[0]).fold(f64::NEG_INFINITY, f64::max);
    (hi > lo).then_some((lo, hi))
}

fn positive_x_range(points: &[[f64; 2]]) -> Option<(f64, f64)> {
    let positive: Vec<[f64; 2]> = points.iter().filter(|p| p[0] > 0.0).copied().collect();
    x_range(&positive)
}

// ---------------------------------------------------------------------------
