//! Presentation adapter: declarative chart requests in, pure artifacts out.
//!
//! `render` maps an already-filtered [`View`] to an [`Artifact`]; it never
//! filters rows itself. `evaluate` is the whole per-interaction pipeline:
//! one filter pass, then one render per requested chart, one `Result` per
//! panel so a bad panel cannot take its siblings down.

pub mod artifact;
mod build;
pub mod fit;

pub use artifact::*;

use eframe::egui::Color32;
use thiserror::Error;

use crate::data::filter::{self, FilterSpec, View};
use crate::data::model::{Field, GapminderTable};

// ---------------------------------------------------------------------------
// Shared chart vocabulary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxisScale {
    #[default]
    Linear,
    Log,
}

/// Plot styling preset, the "stylesheet" toggle of the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Default,
    Alternate,
}

/// Free-floating text pinned to data coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotNote {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

/// Overlay curve drawn on top of a scatter chart.
#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    /// Fixed reference curve `y = intercept + slope·ln x`.
    Curve { intercept: f64, slope: f64 },
    /// Least-squares fit of `y = a + b·ln x` to the view.
    LogFit,
    /// Least-squares polynomial fit of the given degree to the view.
    PolyFit { degree: usize },
}

// ---------------------------------------------------------------------------
// ChartSpec – the declarative chart request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSpec {
    pub title: String,
    pub x: Field,
    pub y: Field,
    pub x_scale: AxisScale,
    /// Color encoding: one marker group (and legend entry) per value.
    pub group_by: Option<Field>,
    /// Restrict the grouping to these values, in this order.
    pub groups: Option<Vec<String>>,
    /// Size encoding: marker radius scales with this field.
    pub size_by: Option<Field>,
    /// Connect each group's markers in view order.
    pub connect: bool,
    pub overlay: Option<Overlay>,
    pub fill: Option<Color32>,
    pub edge: Option<Color32>,
    pub notes: Vec<PlotNote>,
    pub x_bounds: Option<(f64, f64)>,
    pub y_bounds: Option<(f64, f64)>,
}

impl Default for ScatterSpec {
    fn default() -> Self {
        ScatterSpec {
            title: String::new(),
            x: Field::GdpPerCap,
            y: Field::LifeExp,
            x_scale: AxisScale::Linear,
            group_by: None,
            groups: None,
            size_by: None,
            connect: false,
            overlay: None,
            fill: None,
            edge: None,
            notes: Vec::new(),
            x_bounds: None,
            y_bounds: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineSpec {
    pub title: String,
    pub x: Field,
    pub y: Field,
    /// One line (and legend entry) per value of this field.
    pub group_by: Field,
    /// Restrict the grouping to these values, in this order.
    pub groups: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSpec {
    pub title: String,
    pub field: Field,
    /// One density curve per value of this field instead of one overall.
    pub group_by: Option<Field>,
    pub histogram: bool,
    pub density: bool,
    pub bins: usize,
    pub x_bounds: Option<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartSpec {
    /// Scrollable dump of the view.
    Table { title: String },
    /// Describe-style statistics tables.
    Summary { title: String },
    Scatter(ScatterSpec),
    Line(LineSpec),
    Distribution(DistributionSpec),
    /// Two independent requests rendered side by side.
    DualPanel(Box<ChartSpec>, Box<ChartSpec>),
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A chart request that does not fit the view's schema. The offending
/// panel is skipped and reported; sibling panels still render.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("field '{0}' is not numeric")]
    NonNumericField(&'static str),
    #[error("field '{0}' cannot be used for grouping")]
    NonCategoricalField(&'static str),
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Map a filtered view to an artifact. Pure and stateless: no filtering,
/// no caching, no side effects.
pub fn render(
    table: &GapminderTable,
    view: &View,
    spec: &ChartSpec,
) -> Result<Artifact, RenderError> {
    match spec {
        ChartSpec::Table { title } => Ok(Artifact::Table(build::table(table, view, title))),
        ChartSpec::Summary { title } => Ok(Artifact::Summary(build::summary(table, view, title))),
        ChartSpec::Scatter(spec) => build::scatter(table, view, spec).map(Artifact::Scatter),
        ChartSpec::Line(spec) => build::line(table, view, spec).map(Artifact::Line),
        ChartSpec::Distribution(spec) => {
            build::distribution(table, view, spec).map(Artifact::Distribution)
        }
        ChartSpec::DualPanel(left, right) => Ok(Artifact::Panels(vec![
            render(table, view, left),
            render(table, view, right),
        ])),
    }
}

/// One complete interaction: apply the filter once, then render every
/// requested chart against the same view.
pub fn evaluate(
    table: &GapminderTable,
    filter_spec: &FilterSpec,
    charts: &[ChartSpec],
) -> Vec<Result<Artifact, RenderError>> {
    let view = filter::apply(table, filter_spec);
    charts
        .iter()
        .map(|spec| render(table, &view, spec))
        .collect()
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, REQUIRED_COLUMNS};

    fn rec(country: &str, continent: &str, year: u16, gdp: f64, life: f64) -> Record {
        Record {
            country: country.to_string(),
            continent: continent.to_string(),
            year,
            life_exp: life,
            pop: 1_000_000,
            gdp_per_cap: gdp,
        }
    }

    fn table() -> GapminderTable {
        GapminderTable::from_records(vec![
            rec("Norway", "Europe", 2007, 49_357.0, 80.2),
            rec("China", "Asia", 2007, 4_959.0, 73.0),
            rec("Nigeria", "Africa", 2007, 2_014.0, 46.9),
            rec("Norway", "Europe", 2002, 44_683.0, 79.0),
        ])
    }

    #[test]
    fn table_artifact_round_trips_rows_and_columns() {
        let t = table();
        let view = filter::apply(&t, &FilterSpec::Year { year: 2007 });
        let artifact = render(&t, &view, &ChartSpec::Table { title: "rows".into() }).unwrap();

        match artifact {
            Artifact::Table(art) => {
                assert_eq!(art.rows.len(), view.len());
                assert_eq!(art.columns, REQUIRED_COLUMNS);
                // Cell contents survive the trip in view order.
                assert_eq!(art.rows[0][0], "Norway");
                assert_eq!(art.rows[2][0], "Nigeria");
            }
            other => panic!("expected table artifact, got {other:?}"),
        }
    }

    #[test]
    fn scatter_on_categorical_axis_is_a_render_error() {
        let t = table();
        let view = filter::apply(&t, &FilterSpec::All);
        let spec = ChartSpec::Scatter(ScatterSpec {
            x: Field::Continent,
            ..ScatterSpec::default()
        });
        assert_eq!(
            render(&t, &view, &spec).unwrap_err(),
            RenderError::NonNumericField("continent")
        );
    }

    #[test]
    fn dual_panel_halves_fail_independently() {
        let t = table();
        let view = filter::apply(&t, &FilterSpec::All);
        let bad = ChartSpec::Scatter(ScatterSpec {
            y: Field::Country,
            ..ScatterSpec::default()
        });
        let spec = ChartSpec::DualPanel(
            Box::new(bad),
            Box::new(ChartSpec::Table { title: "ok".into() }),
        );

        match render(&t, &view, &spec).unwrap() {
            Artifact::Panels(halves) => {
                assert!(halves[0].is_err());
                assert!(halves[1].is_ok());
            }
            other => panic!("expected panels, got {other:?}"),
        }
    }

    #[test]
    fn evaluate_renders_one_result_per_request() {
        let t = table();
        let charts = vec![
            ChartSpec::Table { title: "rows".into() },
            ChartSpec::Scatter(ScatterSpec {
                x: Field::Country,
                ..ScatterSpec::default()
            }),
            ChartSpec::Summary { title: "stats".into() },
        ];
        let outcomes = evaluate(&t, &FilterSpec::Year { year: 2007 }, &charts);

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].is_ok());
        assert!(outcomes[1].is_err());
        assert!(outcomes[2].is_ok());
    }

    #[test]
    fn evaluate_on_empty_view_still_renders() {
        let t = table();
        let spec = FilterSpec::year_continent(2007, "Atlantis").unwrap();
        let outcomes = evaluate(&t, &spec, &[ChartSpec::Table { title: "rows".into() }]);
        match outcomes[0].as_ref().unwrap() {
            Artifact::Table(art) => assert!(art.rows.is_empty()),
            other => panic!("expected table artifact, got {other:?}"),
        }
    }
}
