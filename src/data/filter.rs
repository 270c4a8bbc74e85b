use std::collections::BTreeSet;

use thiserror::Error;

use super::model::{GapminderTable, Record};

// ---------------------------------------------------------------------------
// FilterSpec – the declarative row predicate
// ---------------------------------------------------------------------------

/// Which records belong in the current view. Built fresh from the sidebar
/// controls on every interaction; carries no identity between frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSpec {
    /// No predicate: the view is the whole table.
    All,
    /// All countries for one survey year.
    Year { year: u16 },
    /// One survey year restricted to one continent.
    YearContinent { year: u16, continent: String },
    /// A set of countries across all years.
    Countries { countries: BTreeSet<String> },
    /// A set of countries within one survey year.
    YearCountries {
        year: u16,
        countries: BTreeSet<String>,
    },
}

/// A structurally invalid predicate. The sidebar's own constraints keep
/// these from being built; hitting one is a programming error surfaced at
/// construction time, never inside [`apply`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidSpecError {
    #[error("country selection is empty")]
    EmptyCountrySet,
    #[error("continent name is empty")]
    EmptyContinent,
}

impl FilterSpec {
    /// Year + continent predicate.
    pub fn year_continent(year: u16, continent: &str) -> Result<Self, InvalidSpecError> {
        if continent.is_empty() {
            return Err(InvalidSpecError::EmptyContinent);
        }
        Ok(FilterSpec::YearContinent {
            year,
            continent: continent.to_string(),
        })
    }

    /// Country-set predicate. An empty selection is rejected here; the
    /// control layer decides the mode-specific fallback instead.
    pub fn countries(countries: BTreeSet<String>) -> Result<Self, InvalidSpecError> {
        if countries.is_empty() {
            return Err(InvalidSpecError::EmptyCountrySet);
        }
        Ok(FilterSpec::Countries { countries })
    }

    /// Year + country-set predicate, same empty-set rule as [`Self::countries`].
    pub fn year_countries(year: u16, countries: BTreeSet<String>) -> Result<Self, InvalidSpecError> {
        if countries.is_empty() {
            return Err(InvalidSpecError::EmptyCountrySet);
        }
        Ok(FilterSpec::YearCountries { year, countries })
    }

    fn matches(&self, record: &Record) -> bool {
        match self {
            FilterSpec::All => true,
            FilterSpec::Year { year } => record.year == *year,
            FilterSpec::YearContinent { year, continent } => {
                record.year == *year && record.continent == *continent
            }
            FilterSpec::Countries { countries } => countries.contains(&record.country),
            FilterSpec::YearCountries { year, countries } => {
                record.year == *year && countries.contains(&record.country)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// View – the filtered subsequence
// ---------------------------------------------------------------------------

/// Indices of the table rows satisfying a [`FilterSpec`], in original
/// table order. Values not present in the table (an unknown continent, a
/// year off the survey grid) simply select nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    indices: Vec<usize>,
}

impl View {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Iterate the selected records in table order.
    pub fn rows<'a>(&'a self, table: &'a GapminderTable) -> impl Iterator<Item = &'a Record> + 'a {
        self.indices.iter().map(|&i| &table.records[i])
    }
}

/// Apply a predicate to the table. Deterministic and order-preserving;
/// never fails for a constructed spec.
pub fn apply(table: &GapminderTable, spec: &FilterSpec) -> View {
    let indices = table
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| spec.matches(rec))
        .map(|(i, _)| i)
        .collect();
    View { indices }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
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

    /// Three countries over three survey years, interleaved so original
    /// ordering is observable.
    fn table() -> GapminderTable {
        GapminderTable::from_records(vec![
            rec("China", "Asia", 1952),
            rec("Norway", "Europe", 1952),
            rec("Nigeria", "Africa", 1952),
            rec("China", "Asia", 2002),
            rec("Norway", "Europe", 2002),
            rec("Nigeria", "Africa", 2002),
            rec("China", "Asia", 2007),
            rec("Norway", "Europe", 2007),
            rec("Nigeria", "Africa", 2007),
        ])
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_filter_view_equals_table() {
        let t = table();
        let view = apply(&t, &FilterSpec::All);
        assert_eq!(view.len(), t.len());
        assert_eq!(view.indices(), (0..t.len()).collect::<Vec<_>>());
    }

    #[test]
    fn apply_is_deterministic() {
        let t = table();
        let spec = FilterSpec::year_continent(2002, "Asia").unwrap();
        assert_eq!(apply(&t, &spec), apply(&t, &spec));
    }

    #[test]
    fn year_continent_selects_exactly_the_matching_rows() {
        let t = table();
        let spec = FilterSpec::year_continent(2007, "Europe").unwrap();
        let view = apply(&t, &spec);

        for row in view.rows(&t) {
            assert_eq!(row.year, 2007);
            assert_eq!(row.continent, "Europe");
        }
        // No row outside the view satisfies both predicates; in
        // particular Europe/2002 stays excluded.
        let selected: Vec<usize> = view.indices().to_vec();
        for (i, row) in t.records.iter().enumerate() {
            if row.year == 2007 && row.continent == "Europe" {
                assert!(selected.contains(&i));
            } else {
                assert!(!selected.contains(&i));
            }
        }
    }

    #[test]
    fn country_set_spans_all_years_in_original_order() {
        let t = table();
        let spec = FilterSpec::countries(set(&["China"])).unwrap();
        let view = apply(&t, &spec);

        let years: Vec<u16> = view.rows(&t).map(|r| r.year).collect();
        assert_eq!(years, [1952, 2002, 2007]);
        assert!(view.rows(&t).all(|r| r.country == "China"));
    }

    #[test]
    fn year_filter_keeps_all_countries_for_that_year() {
        let t = table();
        let view = apply(&t, &FilterSpec::Year { year: 1952 });
        assert_eq!(view.len(), 3);
        assert!(view.rows(&t).all(|r| r.year == 1952));
    }

    #[test]
    fn year_country_set_intersects_both_predicates() {
        let t = table();
        let spec = FilterSpec::year_countries(2002, set(&["China", "Norway"])).unwrap();
        let view = apply(&t, &spec);
        let countries: Vec<&str> = view.rows(&t).map(|r| r.country.as_str()).collect();
        assert_eq!(countries, ["China", "Norway"]);
    }

    #[test]
    fn unknown_continent_yields_empty_view() {
        let t = table();
        let spec = FilterSpec::year_continent(1952, "Atlantis").unwrap();
        assert!(apply(&t, &spec).is_empty());
    }

    #[test]
    fn unknown_country_yields_empty_view() {
        let t = table();
        let spec = FilterSpec::countries(set(&["Wakanda"])).unwrap();
        assert!(apply(&t, &spec).is_empty());
    }

    #[test]
    fn off_grid_year_yields_empty_view() {
        let t = table();
        assert!(apply(&t, &FilterSpec::Year { year: 1999 }).is_empty());
    }

    #[test]
    fn empty_country_selection_is_rejected_at_construction() {
        assert_eq!(
            FilterSpec::countries(BTreeSet::new()).unwrap_err(),
            InvalidSpecError::EmptyCountrySet
        );
        assert_eq!(
            FilterSpec::year_countries(1952, BTreeSet::new()).unwrap_err(),
            InvalidSpecError::EmptyCountrySet
        );
        assert_eq!(
            FilterSpec::year_continent(1952, "").unwrap_err(),
            InvalidSpecError::EmptyContinent
        );
    }
}
