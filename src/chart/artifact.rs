use eframe::egui::Color32;

use crate::data::stats::{CategoricalSummary, NumericSummary};

use super::{PlotNote, RenderError};

// ---------------------------------------------------------------------------
// Artifact – the rendered output of one chart request
// ---------------------------------------------------------------------------

/// Pure presentation data produced by [`super::render`]. The `ui` layer
/// turns artifacts into widgets; nothing here touches the toolkit beyond
/// plain color values.
#[derive(Debug, Clone, PartialEq)]
pub enum Artifact {
    Table(TableArtifact),
    Summary(SummaryArtifact),
    Scatter(ScatterArtifact),
    Line(LineArtifact),
    Distribution(DistributionArtifact),
    /// Two independent halves rendered side by side. A failed half keeps
    /// its error so the sibling still shows.
    Panels(Vec<Result<Artifact, RenderError>>),
}

// ---------------------------------------------------------------------------
// Tabular artifacts
// ---------------------------------------------------------------------------

/// A scrollable dump of the view, one formatted cell per column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableArtifact {
    pub title: String,
    pub columns: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

/// Describe-style statistics tables for the view.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryArtifact {
    pub title: String,
    pub numeric: Vec<NumericSummary>,
    pub categorical: Vec<CategoricalSummary>,
}

// ---------------------------------------------------------------------------
// Plot artifacts
// ---------------------------------------------------------------------------

/// One scatter marker. Radius carries the size encoding (constant when
/// the chart declares none).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerPoint {
    pub x: f64,
    pub y: f64,
    pub radius: f32,
}

/// One legend entry's worth of scatter markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterGroup {
    /// Group value for the legend; `None` for an ungrouped chart.
    pub name: Option<String>,
    pub points: Vec<MarkerPoint>,
    /// Draw a polyline through the points in view order.
    pub connect: bool,
}

/// A named polyline (line-chart series, overlay curve, density curve).
#[derive(Debug, Clone, PartialEq)]
pub struct CurveSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterArtifact {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    /// Draw x on a log10 axis.
    pub log_x: bool,
    pub groups: Vec<ScatterGroup>,
    /// Fitted or fixed reference curve.
    pub overlay: Option<CurveSeries>,
    /// Fixed marker fill/edge; palette colors apply when absent.
    pub fill: Option<Color32>,
    pub edge: Option<Color32>,
    pub notes: Vec<PlotNote>,
    pub x_bounds: Option<(f64, f64)>,
    pub y_bounds: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineArtifact {
    pub title: String,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub series: Vec<CurveSeries>,
}

/// One histogram bar, horizontally centered on `center`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistBar {
    pub center: f64,
    pub width: f64,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionArtifact {
    pub title: String,
    pub x_label: &'static str,
    pub bars: Vec<HistBar>,
    /// Density curves, one per group (or a single unnamed overall curve).
    pub curves: Vec<CurveSeries>,
    pub x_bounds: Option<(f64, f64)>,
}
