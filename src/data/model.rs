use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Record – one row of the Gapminder table
// ---------------------------------------------------------------------------

/// One country/year observation. Field names follow the CSV schema
/// (`lifeExp` and `gdpPercap` are renamed to snake case on the Rust side).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub country: String,
    pub continent: String,
    pub year: u16,
    #[serde(rename = "lifeExp")]
    pub life_exp: f64,
    pub pop: u64,
    #[serde(rename = "gdpPercap")]
    pub gdp_per_cap: f64,
}

/// Column names a source file must provide, in schema order.
pub const REQUIRED_COLUMNS: [&str; 6] =
    ["country", "continent", "year", "lifeExp", "pop", "gdpPercap"];

/// The survey years form a fixed 5-year grid shared by all records.
pub const YEAR_MIN: u16 = 1952;
pub const YEAR_MAX: u16 = 2007;
pub const YEAR_STEP: u16 = 5;

// ---------------------------------------------------------------------------
// Field – typed reference to a schema column
// ---------------------------------------------------------------------------

/// A schema column. Chart and statistics code addresses columns through
/// this enum instead of bare strings, so a field/chart mismatch is caught
/// as a typed error rather than a lookup failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Country,
    Continent,
    Year,
    LifeExp,
    Pop,
    GdpPerCap,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Country,
        Field::Continent,
        Field::Year,
        Field::LifeExp,
        Field::Pop,
        Field::GdpPerCap,
    ];

    pub const NUMERIC: [Field; 4] = [Field::Year, Field::LifeExp, Field::Pop, Field::GdpPerCap];

    pub const CATEGORICAL: [Field; 2] = [Field::Country, Field::Continent];

    /// CSV column name.
    pub const fn name(self) -> &'static str {
        match self {
            Field::Country => "country",
            Field::Continent => "continent",
            Field::Year => "year",
            Field::LifeExp => "lifeExp",
            Field::Pop => "pop",
            Field::GdpPerCap => "gdpPercap",
        }
    }

    /// Human-readable axis label.
    pub const fn label(self) -> &'static str {
        match self {
            Field::Country => "Country",
            Field::Continent => "Continent",
            Field::Year => "Year",
            Field::LifeExp => "Life expectancy",
            Field::Pop => "Population",
            Field::GdpPerCap => "GDP per capita (USD)",
        }
    }

    /// Numeric value of this field for a record, `None` for the two
    /// categorical columns.
    pub fn numeric_value(self, record: &Record) -> Option<f64> {
        match self {
            Field::Year => Some(f64::from(record.year)),
            Field::LifeExp => Some(record.life_exp),
            Field::Pop => Some(record.pop as f64),
            Field::GdpPerCap => Some(record.gdp_per_cap),
            Field::Country | Field::Continent => None,
        }
    }

    /// Text value of this field for a record, `None` for numeric columns.
    pub fn text_value(self, record: &Record) -> Option<&str> {
        match self {
            Field::Country => Some(&record.country),
            Field::Continent => Some(&record.continent),
            _ => None,
        }
    }

    /// Cell rendering for the table view.
    pub fn display_value(self, record: &Record) -> String {
        match self {
            Field::Country => record.country.clone(),
            Field::Continent => record.continent.clone(),
            Field::Year => record.year.to_string(),
            Field::LifeExp => format!("{:.3}", record.life_exp),
            Field::Pop => record.pop.to_string(),
            Field::GdpPerCap => format!("{:.4}", record.gdp_per_cap),
        }
    }
}

// ---------------------------------------------------------------------------
// GapminderTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with pre-computed unique-value indices.
/// Built once per load and treated as immutable afterwards.
#[derive(Debug, Clone)]
pub struct GapminderTable {
    /// All records in source order.
    pub records: Vec<Record>,
    /// Unique continents in first-appearance order (the order the
    /// sidebar radio lists them).
    pub continents: Vec<String>,
    /// Unique countries in first-appearance order.
    pub countries: Vec<String>,
    /// Unique years, sorted ascending.
    pub years: Vec<u16>,
}

impl GapminderTable {
    /// Build the unique-value indices from loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut continents: Vec<String> = Vec::new();
        let mut countries: Vec<String> = Vec::new();
        let mut years: Vec<u16> = Vec::new();

        for rec in &records {
            if !continents.contains(&rec.continent) {
                continents.push(rec.continent.clone());
            }
            if !countries.contains(&rec.country) {
                countries.push(rec.country.clone());
            }
            if !years.contains(&rec.year) {
                years.push(rec.year);
            }
        }
        years.sort_unstable();

        GapminderTable {
            records,
            continents,
            countries,
            years,
        }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn unique_indices_keep_first_appearance_order() {
        let table = GapminderTable::from_records(vec![
            rec("Norway", "Europe", 1957),
            rec("China", "Asia", 1952),
            rec("Norway", "Europe", 1952),
            rec("Nigeria", "Africa", 1952),
        ]);
        assert_eq!(table.continents, ["Europe", "Asia", "Africa"]);
        assert_eq!(table.countries, ["Norway", "China", "Nigeria"]);
        assert_eq!(table.years, [1952, 1957]);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn field_accessors_split_numeric_and_text() {
        let r = rec("Norway", "Europe", 2007);
        assert_eq!(Field::Year.numeric_value(&r), Some(2007.0));
        assert_eq!(Field::Country.numeric_value(&r), None);
        assert_eq!(Field::Continent.text_value(&r), Some("Europe"));
        assert_eq!(Field::GdpPerCap.text_value(&r), None);
        assert_eq!(Field::LifeExp.display_value(&r), "60.000");
    }
}
