use super::filter::View;
use super::model::{Field, GapminderTable};

// ---------------------------------------------------------------------------
// Describe-style summaries over a view
// ---------------------------------------------------------------------------

/// Aggregates for one numeric column. All aggregates except `count` are
/// absent when the view selects no rows.
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub field: Field,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation (n - 1 denominator); absent below two rows.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Aggregates for one categorical column.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub field: Field,
    pub count: usize,
    pub unique: usize,
    /// Most frequent value; first-appearance order breaks ties.
    pub top: Option<String>,
    /// Occurrences of `top`.
    pub freq: usize,
}

/// Summarize every numeric column of the view.
pub fn describe_numeric(table: &GapminderTable, view: &View) -> Vec<NumericSummary> {
    Field::NUMERIC
        .iter()
        .map(|&field| {
            let values: Vec<f64> = view
                .rows(table)
                .filter_map(|r| field.numeric_value(r))
                .collect();
            numeric_summary(field, &values)
        })
        .collect()
}

/// Summarize every categorical column of the view.
pub fn describe_categorical(table: &GapminderTable, view: &View) -> Vec<CategoricalSummary> {
    Field::CATEGORICAL
        .iter()
        .map(|&field| {
            let values: Vec<&str> = view
                .rows(table)
                .filter_map(|r| field.text_value(r))
                .collect();
            categorical_summary(field, &values)
        })
        .collect()
}

fn numeric_summary(field: Field, values: &[f64]) -> NumericSummary {
    let count = values.len();
    if count == 0 {
        return NumericSummary {
            field,
            count,
            mean: None,
            std: None,
            min: None,
            q25: None,
            median: None,
            q75: None,
            max: None,
        };
    }

    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
        Some((ss / (count - 1) as f64).sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    NumericSummary {
        field,
        count,
        mean: Some(mean),
        std,
        min: sorted.first().copied(),
        q25: Some(quantile(&sorted, 0.25)),
        median: Some(quantile(&sorted, 0.5)),
        q75: Some(quantile(&sorted, 0.75)),
        max: sorted.last().copied(),
    }
}

/// Linear-interpolation quantile over an already sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (pos - lo as f64) * (sorted[hi] - sorted[lo])
    }
}

fn categorical_summary(field: Field, values: &[&str]) -> CategoricalSummary {
    // First-appearance order, counted in one pass.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for v in values {
        match counts.iter_mut().find(|(name, _)| name == v) {
            Some((_, n)) => *n += 1,
            None => counts.push((v, 1)),
        }
    }

    let (top, freq) = counts
        .iter()
        .max_by_key(|(_, n)| *n)
        .map(|(name, n)| (Some(name.to_string()), *n))
        .unwrap_or((None, 0));

    CategoricalSummary {
        field,
        count: values.len(),
        unique: counts.len(),
        top,
        freq,
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSpec};
    use crate::data::model::Record;

    fn rec(country: &str, continent: &str, year: u16, life_exp: f64) -> Record {
        Record {
            country: country.to_string(),
            continent: continent.to_string(),
            year,
            life_exp,
            pop: 1_000_000,
            gdp_per_cap: 5_000.0,
        }
    }

    fn table() -> GapminderTable {
        GapminderTable::from_records(vec![
            rec("Norway", "Europe", 1952, 70.0),
            rec("Norway", "Europe", 1957, 72.0),
            rec("China", "Asia", 1952, 44.0),
            rec("China", "Asia", 1957, 50.0),
            rec("Nigeria", "Africa", 1952, 36.0),
        ])
    }

    #[test]
    fn numeric_describe_on_known_values() {
        let t = table();
        let view = apply(&t, &FilterSpec::All);
        let summaries = describe_numeric(&t, &view);

        let life = summaries
            .iter()
            .find(|s| s.field == Field::LifeExp)
            .unwrap();
        assert_eq!(life.count, 5);
        assert!((life.mean.unwrap() - 54.4).abs() < 1e-9);
        assert_eq!(life.min, Some(36.0));
        assert_eq!(life.max, Some(72.0));
        assert_eq!(life.median, Some(50.0));
        // Sample std of [70, 72, 44, 50, 36] is sqrt(254.8).
        assert!((life.std.unwrap() - 254.8_f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn categorical_describe_counts_top_and_freq() {
        let t = table();
        let view = apply(&t, &FilterSpec::All);
        let summaries = describe_categorical(&t, &view);

        let continent = summaries
            .iter()
            .find(|s| s.field == Field::Continent)
            .unwrap();
        assert_eq!(continent.count, 5);
        assert_eq!(continent.unique, 3);
        // Europe and Asia both appear twice; first appearance wins.
        assert_eq!(continent.top.as_deref(), Some("Europe"));
        assert_eq!(continent.freq, 2);

        let country = summaries
            .iter()
            .find(|s| s.field == Field::Country)
            .unwrap();
        assert_eq!(country.unique, 3);
    }

    #[test]
    fn empty_view_describes_to_zero_counts() {
        let t = table();
        let spec = FilterSpec::year_continent(1952, "Atlantis").unwrap();
        let view = apply(&t, &spec);

        for s in describe_numeric(&t, &view) {
            assert_eq!(s.count, 0);
            assert_eq!(s.mean, None);
            assert_eq!(s.min, None);
        }
        for s in describe_categorical(&t, &view) {
            assert_eq!(s.count, 0);
            assert_eq!(s.top, None);
        }
    }

    #[test]
    fn single_row_has_no_std() {
        let t = table();
        let spec = FilterSpec::countries([String::from("Nigeria")].into()).unwrap();
        let view = apply(&t, &spec);
        let life = describe_numeric(&t, &view)
            .into_iter()
            .find(|s| s.field == Field::LifeExp)
            .unwrap();
        assert_eq!(life.count, 1);
        assert_eq!(life.std, None);
        assert_eq!(life.mean, Some(36.0));
    }
}
