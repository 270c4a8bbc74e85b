use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::model::{GapminderTable, Record, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Why a source file could not be turned into a [`GapminderTable`].
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: {source}")]
    BadRecord {
        /// 1-based data row number (header excluded).
        row: usize,
        #[source]
        source: csv::Error,
    },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a Gapminder table from a CSV file on disk.
///
/// Pure and idempotent: the same file yields the same table. The caller
/// owns the result for the rest of the session; nothing is cached here.
pub fn load_path(path: &Path) -> Result<GapminderTable, DataLoadError> {
    let file = std::fs::File::open(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_reader(io::BufReader::new(file))
}

/// Load a Gapminder table from any CSV byte stream.
///
/// The header row is validated against the required schema before any
/// record is parsed, so a missing column is reported by name instead of
/// as a deserialization failure on row 1.
pub fn load_reader<R: io::Read>(reader: R) -> Result<GapminderTable, DataLoadError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    for required in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == required) {
            return Err(DataLoadError::MissingColumn(required));
        }
    }

    let mut records = Vec::new();
    for (i, result) in csv_reader.deserialize::<Record>().enumerate() {
        let record = result.map_err(|source| DataLoadError::BadRecord { row: i + 1, source })?;
        records.push(record);
    }

    Ok(GapminderTable::from_records(records))
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SAMPLE: &str = "\
country,continent,year,lifeExp,pop,gdpPercap
Afghanistan,Asia,1952,28.801,8425333,779.4453145
Norway,Europe,1952,72.67,3327728,10095.42172
Norway,Europe,1957,73.44,3491938,11653.97304
";

    #[test]
    fn loads_valid_csv() {
        let table = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(table.continents, ["Asia", "Europe"]);
        assert_eq!(table.countries, ["Afghanistan", "Norway"]);
        assert_eq!(table.years, [1952, 1957]);

        let first = &table.records[0];
        assert_eq!(first.country, "Afghanistan");
        assert_eq!(first.year, 1952);
        assert_eq!(first.pop, 8_425_333);
        assert!((first.gdp_per_cap - 779.4453145).abs() < 1e-9);
    }

    #[test]
    fn loading_is_idempotent() {
        let a = load_reader(SAMPLE.as_bytes()).unwrap();
        let b = load_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(a.records, b.records);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = "\
country,continent,year,lifeExp,pop,gdpPercap,iso_alpha
Norway,Europe,2007,80.196,4627926,49357.19017,NOR
";
        let table = load_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn missing_column_is_reported_by_name() {
        let csv = "country,continent,year,lifeExp,pop\nNorway,Europe,2007,80.196,4627926\n";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::MissingColumn(col) => assert_eq!(col, "gdpPercap"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn unparseable_value_names_the_row() {
        let csv = "\
country,continent,year,lifeExp,pop,gdpPercap
Norway,Europe,2007,80.196,4627926,49357.19017
Norway,Europe,not-a-year,80.196,4627926,49357.19017
";
        let err = load_reader(csv.as_bytes()).unwrap_err();
        match err {
            DataLoadError::BadRecord { row, .. } => assert_eq!(row, 2),
            other => panic!("expected BadRecord, got {other:?}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_path(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DataLoadError::Io { .. }));
    }

    #[test]
    fn load_path_reads_a_real_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(SAMPLE.as_bytes()).unwrap();
        let table = load_path(tmp.path()).unwrap();
        assert_eq!(table.len(), 3);
    }
}
