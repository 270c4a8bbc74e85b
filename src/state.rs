use std::collections::BTreeSet;
use std::path::PathBuf;

use eframe::egui::Color32;

use crate::chart::{
    AxisScale, ChartSpec, ChartStyle, DistributionSpec, LineSpec, Overlay, PlotNote, ScatterSpec,
};
use crate::data::filter::{FilterSpec, InvalidSpecError};
use crate::data::model::{Field, GapminderTable, YEAR_MAX, YEAR_MIN};

/// Countries the gallery line charts follow over time.
pub const LINE_COUNTRIES: [&str; 5] =
    ["Nigeria", "China", "United States", "Norway", "Netherlands"];

/// Countries whose 1952-2007 trajectories the scatter panels follow.
pub const TRAJECTORY_COUNTRIES: [&str; 4] = ["China", "Nigeria", "Norway", "United States"];

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub table: Option<GapminderTable>,

    /// Where the table came from. Re-opening the same path keeps the
    /// cached table; only a different source triggers a reload.
    pub source: Option<PathBuf>,

    /// Active mode and its controls.
    pub mode: ModeControls,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            mode: ModeControls::new(ModeKind::Explorer, None),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded table and reset the mode controls to
    /// defaults derived from it.
    pub fn set_table(&mut self, source: PathBuf, table: GapminderTable) {
        self.mode = ModeControls::new(self.mode.kind(), Some(&table));
        self.table = Some(table);
        self.source = Some(source);
        self.status_message = None;
        self.loading = false;
    }
}

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeKind {
    Explorer,
    Gallery,
    Interactive,
    Fits,
}

impl ModeKind {
    pub const ALL: [ModeKind; 4] = [
        ModeKind::Explorer,
        ModeKind::Gallery,
        ModeKind::Interactive,
        ModeKind::Fits,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            ModeKind::Explorer => "Data explorer",
            ModeKind::Gallery => "Chart gallery",
            ModeKind::Interactive => "Interactive plots",
            ModeKind::Fits => "Regression fits",
        }
    }
}

/// The active mode, each variant carrying its own strongly-typed
/// controls. Everything downstream dispatches on this with an explicit
/// `match`.
pub enum ModeControls {
    Explorer(ExplorerControls),
    Gallery(GalleryControls),
    Interactive(InteractiveControls),
    Fits(FitsControls),
}

impl ModeControls {
    pub fn new(kind: ModeKind, table: Option<&GapminderTable>) -> Self {
        match kind {
            ModeKind::Explorer => ModeControls::Explorer(ExplorerControls::new(table)),
            ModeKind::Gallery => ModeControls::Gallery(GalleryControls::default()),
            ModeKind::Interactive => ModeControls::Interactive(InteractiveControls::default()),
            ModeKind::Fits => ModeControls::Fits(FitsControls::default()),
        }
    }

    pub fn kind(&self) -> ModeKind {
        match self {
            ModeControls::Explorer(_) => ModeKind::Explorer,
            ModeControls::Gallery(_) => ModeKind::Gallery,
            ModeControls::Interactive(_) => ModeKind::Interactive,
            ModeControls::Fits(_) => ModeKind::Fits,
        }
    }
}

// ---------------------------------------------------------------------------
// Explorer mode: table + statistics
// ---------------------------------------------------------------------------

pub struct ExplorerControls {
    pub filter_enabled: bool,
    pub year: u16,
    pub continent: String,
    pub countries: BTreeSet<String>,
}

impl ExplorerControls {
    pub fn new(table: Option<&GapminderTable>) -> Self {
        ExplorerControls {
            filter_enabled: false,
            year: YEAR_MIN,
            continent: table
                .and_then(|t| t.continents.first().cloned())
                .unwrap_or_default(),
            countries: BTreeSet::new(),
        }
    }

    /// Filter policy: no filter when disabled; otherwise the country
    /// selection wins, and an empty selection falls back to
    /// year + continent.
    pub fn filter_spec(&self) -> Result<FilterSpec, InvalidSpecError> {
        if !self.filter_enabled {
            return Ok(FilterSpec::All);
        }
        if self.countries.is_empty() {
            FilterSpec::year_continent(self.year, &self.continent)
        } else {
            FilterSpec::countries(self.countries.clone())
        }
    }

    fn table_heading(&self) -> &'static str {
        if !self.filter_enabled {
            "Unfiltered data frame"
        } else if self.countries.is_empty() {
            "Data frame filtered on year and continent"
        } else {
            "Data frame filtered on countries"
        }
    }

    pub fn chart_specs(&self) -> Vec<ChartSpec> {
        vec![ChartSpec::DualPanel(
            Box::new(ChartSpec::Table {
                title: self.table_heading().to_string(),
            }),
            Box::new(ChartSpec::Summary {
                title: "Dataframe statistics".to_string(),
            }),
        )]
    }
}

// ---------------------------------------------------------------------------
// Gallery mode: scatter / line / grouped scatter walkthrough
// ---------------------------------------------------------------------------

pub struct GalleryControls {
    pub filter_enabled: bool,
    pub year: u16,
    pub countries: BTreeSet<String>,
    pub style: ChartStyle,
}

impl Default for GalleryControls {
    fn default() -> Self {
        GalleryControls {
            filter_enabled: false,
            year: YEAR_MIN,
            countries: BTreeSet::new(),
            style: ChartStyle::default(),
        }
    }
}

impl GalleryControls {
    /// Filter policy: no filter when disabled; with the filter on, an
    /// empty country selection means all countries for the chosen year.
    pub fn filter_spec(&self) -> Result<FilterSpec, InvalidSpecError> {
        if !self.filter_enabled {
            return Ok(FilterSpec::All);
        }
        if self.countries.is_empty() {
            Ok(FilterSpec::Year { year: self.year })
        } else {
            FilterSpec::year_countries(self.year, self.countries.clone())
        }
    }

    pub fn chart_specs(&self) -> Vec<ChartSpec> {
        let strings = |names: &[&str]| names.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        vec![
            ChartSpec::DualPanel(
                Box::new(ChartSpec::Scatter(ScatterSpec {
                    title: "Gapminder data".to_string(),
                    overlay: Some(Overlay::Curve {
                        intercept: 4.95,
                        slope: 7.2,
                    }),
                    ..ScatterSpec::default()
                })),
                Box::new(ChartSpec::Scatter(ScatterSpec {
                    title: "Logarithmic fit".to_string(),
                    overlay: Some(Overlay::LogFit),
                    x_bounds: Some((-5_000.0, 100_000.0)),
                    y_bounds: Some((0.0, 90.0)),
                    ..ScatterSpec::default()
                })),
            ),
            ChartSpec::Line(LineSpec {
                title: "GDP per capita over time".to_string(),
                x: Field::Year,
                y: Field::GdpPerCap,
                group_by: Field::Country,
                groups: Some(strings(&LINE_COUNTRIES)),
            }),
            ChartSpec::DualPanel(
                Box::new(ChartSpec::Scatter(ScatterSpec {
                    title: "All countries".to_string(),
                    ..ScatterSpec::default()
                })),
                Box::new(ChartSpec::Scatter(ScatterSpec {
                    title: "1952 through 2007".to_string(),
                    group_by: Some(Field::Country),
                    groups: Some(strings(&TRAJECTORY_COUNTRIES)),
                    size_by: Some(Field::Year),
                    ..ScatterSpec::default()
                })),
            ),
        ]
    }
}

// ---------------------------------------------------------------------------
// Interactive mode: styled scatters + distributions
// ---------------------------------------------------------------------------

pub struct InteractiveControls {
    pub style: ChartStyle,
    pub marker_color: Color32,
    pub marker_edge_color: Color32,
    pub year: u16,
    pub x_scale: AxisScale,
}

impl Default for InteractiveControls {
    fn default() -> Self {
        InteractiveControls {
            style: ChartStyle::default(),
            marker_color: Color32::from_rgb(0xEA, 0x72, 0x72),
            marker_edge_color: Color32::from_rgb(0xA8, 0x03, 0x03),
            year: YEAR_MIN,
            x_scale: AxisScale::default(),
        }
    }
}

impl InteractiveControls {
    /// The year slider is the only row filter in this mode.
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::Year { year: self.year }
    }

    /// Charts drawn from the year-filtered view.
    pub fn year_chart_specs(&self) -> Vec<ChartSpec> {
        let notes = if self.year == 2007 {
            // Call out the 2007 GDP-per-capita outliers.
            vec![PlotNote {
                x: 42_000.0,
                y: 67.0,
                text: "Norway\nKuwait\nSingapore".to_string(),
            }]
        } else {
            Vec::new()
        };

        vec![
            ChartSpec::Scatter(ScatterSpec {
                title: format!("Year {}", self.year),
                x_scale: self.x_scale,
                fill: Some(self.marker_color),
                edge: Some(self.marker_edge_color),
                notes,
                ..ScatterSpec::default()
            }),
            ChartSpec::DualPanel(
                Box::new(ChartSpec::Distribution(DistributionSpec {
                    title: format!("Year {}", self.year),
                    field: Field::LifeExp,
                    group_by: None,
                    histogram: true,
                    density: true,
                    bins: 10,
                    x_bounds: Some((25.0, 95.0)),
                })),
                Box::new(ChartSpec::Distribution(DistributionSpec {
                    title: format!("Life expectancy per continent, {}", self.year),
                    field: Field::LifeExp,
                    group_by: Some(Field::Continent),
                    histogram: false,
                    density: true,
                    bins: 0,
                    x_bounds: Some((25.0, 95.0)),
                })),
            ),
        ]
    }

    /// The trajectory panel ignores the year slider: it follows four
    /// countries across the whole survey range.
    pub fn trajectory_chart_spec(&self) -> ChartSpec {
        ChartSpec::Scatter(ScatterSpec {
            title: format!("{YEAR_MIN} through {YEAR_MAX}"),
            group_by: Some(Field::Country),
            groups: Some(TRAJECTORY_COUNTRIES.iter().map(|s| s.to_string()).collect()),
            size_by: Some(Field::Year),
            connect: true,
            ..ScatterSpec::default()
        })
    }
}

// ---------------------------------------------------------------------------
// Fits mode: four regression panels
// ---------------------------------------------------------------------------

pub struct FitsControls {
    pub year: u16,
}

impl Default for FitsControls {
    fn default() -> Self {
        FitsControls { year: YEAR_MAX }
    }
}

impl FitsControls {
    pub fn filter_spec(&self) -> FilterSpec {
        FilterSpec::Year { year: self.year }
    }

    pub fn chart_specs(&self) -> Vec<ChartSpec> {
        let panel = |title: &str, overlay: Overlay| {
            Box::new(ChartSpec::Scatter(ScatterSpec {
                title: title.to_string(),
                overlay: Some(overlay),
                x_bounds: Some((-5_000.0, 100_000.0)),
                y_bounds: Some((0.0, 90.0)),
                ..ScatterSpec::default()
            }))
        };

        vec![
            ChartSpec::DualPanel(
                panel("Linear fit", Overlay::PolyFit { degree: 1 }),
                panel("2nd order polynomial fit", Overlay::PolyFit { degree: 2 }),
            ),
            ChartSpec::DualPanel(
                panel("3rd order polynomial fit", Overlay::PolyFit { degree: 3 }),
                panel("Logarithmic fit", Overlay::LogFit),
            ),
        ]
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::apply;
    use crate::data::model::Record;

    fn rec(country: &str, continent: &str, year: u16) -> Record {
        Record {
            country: country.to_string(),
            continent: continent.to_string(),
            year,
            life_exp: 60.0,
            pop: 1_000_000,
            gdp_per_cap: 5_000.0,
        }
    }

    fn table() -> GapminderTable {
        GapminderTable::from_records(vec![
            rec("China", "Asia", 1952),
            rec("Norway", "Europe", 1952),
            rec("China", "Asia", 2007),
            rec("Norway", "Europe", 2007),
        ])
    }

    #[test]
    fn explorer_disabled_filter_is_no_filter() {
        let c = ExplorerControls::new(Some(&table()));
        assert_eq!(c.filter_spec().unwrap(), FilterSpec::All);
    }

    #[test]
    fn explorer_empty_selection_falls_back_to_year_continent() {
        let mut c = ExplorerControls::new(Some(&table()));
        c.filter_enabled = true;
        c.year = 1952;
        assert_eq!(
            c.filter_spec().unwrap(),
            FilterSpec::YearContinent {
                year: 1952,
                continent: "Asia".to_string(),
            }
        );
    }

    #[test]
    fn explorer_country_selection_wins_over_year_continent() {
        let mut c = ExplorerControls::new(Some(&table()));
        c.filter_enabled = true;
        c.countries.insert("Norway".to_string());
        match c.filter_spec().unwrap() {
            FilterSpec::Countries { countries } => {
                assert!(countries.contains("Norway"));
            }
            other => panic!("expected country filter, got {other:?}"),
        }
    }

    #[test]
    fn gallery_empty_selection_keeps_all_countries_for_the_year() {
        let mut c = GalleryControls::default();
        c.filter_enabled = true;
        c.year = 1952;
        let spec = c.filter_spec().unwrap();
        assert_eq!(spec, FilterSpec::Year { year: 1952 });

        // All rows for 1952 survive, none are dropped and nothing errors.
        let t = table();
        let view = apply(&t, &spec);
        assert_eq!(view.len(), 2);
        assert!(view.rows(&t).all(|r| r.year == 1952));
    }

    #[test]
    fn gallery_selection_restricts_to_year_and_countries() {
        let mut c = GalleryControls::default();
        c.filter_enabled = true;
        c.year = 2007;
        c.countries.insert("China".to_string());
        let t = table();
        let view = apply(&t, &c.filter_spec().unwrap());
        let rows: Vec<_> = view.rows(&t).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].country, "China");
        assert_eq!(rows[0].year, 2007);
    }

    #[test]
    fn interactive_notes_appear_only_in_2007() {
        let mut c = InteractiveControls::default();
        c.year = 2007;
        match &c.year_chart_specs()[0] {
            ChartSpec::Scatter(s) => assert_eq!(s.notes.len(), 1),
            other => panic!("expected scatter, got {other:?}"),
        }
        c.year = 1952;
        match &c.year_chart_specs()[0] {
            ChartSpec::Scatter(s) => assert!(s.notes.is_empty()),
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn interactive_trajectories_span_all_years() {
        let c = InteractiveControls::default();
        // The trajectory panel is rendered against an unfiltered view.
        let t = table();
        let view = apply(&t, &FilterSpec::All);
        assert_eq!(view.len(), t.len());
        match c.trajectory_chart_spec() {
            ChartSpec::Scatter(s) => {
                assert!(s.connect);
                assert_eq!(s.size_by, Some(Field::Year));
                assert_eq!(s.groups.as_ref().map(Vec::len), Some(4));
            }
            other => panic!("expected scatter, got {other:?}"),
        }
    }

    #[test]
    fn fits_mode_defaults_to_the_last_survey_year() {
        let c = FitsControls::default();
        assert_eq!(c.filter_spec(), FilterSpec::Year { year: 2007 });
        assert_eq!(c.chart_specs().len(), 2);
    }

    #[test]
    fn mode_switch_builds_matching_controls() {
        for kind in ModeKind::ALL {
            let mode = ModeControls::new(kind, Some(&table()));
            assert_eq!(mode.kind(), kind);
        }
    }
}
