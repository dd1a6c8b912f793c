//! Dataset adapters
//!
//! Turns a user supplied source (raw CSV bytes or the name of a bundled
//! dataset) into a typed [`DataFrame`]. Column types are inferred here, so
//! everything downstream can rely on a column being numeric or categorical.

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::*;

/// Field values treated as missing
const MISSING_MARKERS: [&str; 3] = ["", "NA", "NaN"];

/// Where a dataset comes from
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// One of the bundled datasets
    Builtin(BuiltinDataset),
    /// Raw bytes of a delimited text table with a header row
    Csv(Vec<u8>),
}

impl DataSource {
    /// Resolve a bundled dataset by name
    pub fn builtin(name: &str) -> Result<Self> {
        Ok(DataSource::Builtin(name.parse()?))
    }

    /// Wrap raw CSV bytes
    pub fn csv(bytes: impl Into<Vec<u8>>) -> Self {
        DataSource::Csv(bytes.into())
    }
}

/// CSV parsing options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CsvOptions {
    /// Field delimiter
    pub delimiter: u8,
    /// Upper bound on data rows accepted from a single upload
    pub max_rows: usize,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b',',
            max_rows: 1_000_000,
        }
    }
}

/// Load a dataset from any supported source
pub fn load(source: &DataSource, options: &CsvOptions) -> Result<DataFrame> {
    match source {
        DataSource::Builtin(dataset) => dataset.load(),
        DataSource::Csv(bytes) => read_csv(bytes, options),
    }
}

/// Parse a delimited table with a header row.
///
/// Empty fields and `NA` are missing values. A column is numeric when every
/// non-missing field parses as a finite number, otherwise it is categorical.
pub fn read_csv(bytes: &[u8], options: &CsvOptions) -> Result<DataFrame> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(bytes);

    let headers = reader.headers().map_err(invalid_format)?.clone();
    if headers.is_empty() {
        return Err(DataError::InvalidFormat("input contains no header row".to_string()));
    }

    let names = column_labels(&headers);
    let mut raw: Vec<Vec<Option<String>>> = vec![Vec::new(); names.len()];

    for (row, record) in reader.records().enumerate() {
        if row >= options.max_rows {
            return Err(DataError::InvalidFormat(format!(
                "table exceeds the limit of {} rows",
                options.max_rows
            )));
        }

        let record = record.map_err(invalid_format)?;
        for (column, field) in raw.iter_mut().zip(record.iter()) {
            if MISSING_MARKERS.contains(&field) {
                column.push(None);
            } else {
                column.push(Some(field.to_string()));
            }
        }
    }

    if raw[0].is_empty() {
        return Err(DataError::InvalidFormat("table has no data rows".to_string()));
    }

    let mut builder = DataFrameBuilder::new();
    for (name, values) in names.into_iter().zip(raw) {
        builder = builder.with_column(name, infer_series(&values))?;
    }

    let df = builder.build()?;
    debug!(
        "loaded table with {} rows and {} columns ({} numeric)",
        df.nrows(),
        df.ncols(),
        df.numeric_column_names().len()
    );

    Ok(df)
}

/// Ordered column names of a dataset
pub fn column_names(df: &DataFrame) -> Vec<String> {
    df.column_names().into_iter().map(String::from).collect()
}

/// Whether the named column was classified as numeric
pub fn is_numeric(df: &DataFrame, name: &str) -> Result<bool> {
    df.is_numeric(name)
}

/// Names of the numeric columns, in column order
pub fn numeric_column_names(df: &DataFrame) -> Vec<String> {
    df.numeric_column_names().into_iter().map(String::from).collect()
}

fn column_labels(headers: &csv::StringRecord) -> Vec<String> {
    let labels: Vec<&str> = headers
        .iter()
        .map(|h| if h.is_empty() { "X" } else { h })
        .collect();

    let unique = make_unique(&labels);
    for (original, renamed) in headers.iter().zip(&unique) {
        if original != renamed {
            warn!("renamed column '{}' to '{}'", original, renamed);
        }
    }

    unique
}

fn infer_series(values: &[Option<String>]) -> Series {
    let parsed: Option<Vec<Option<f64>>> = values
        .iter()
        .map(|v| match v {
            None => Some(None),
            Some(s) => s.parse::<f64>().ok().filter(|x| x.is_finite()).map(Some),
        })
        .collect();

    match parsed {
        Some(numbers) => Series::float_opt(&numbers),
        None => Series::categorical_opt(values),
    }
}

fn invalid_format(err: csv::Error) -> DataError {
    match err.kind() {
        csv::ErrorKind::UnequalLengths {
            pos,
            expected_len,
            len,
        } => {
            let line = pos.as_ref().map(|p| p.line()).unwrap_or_default();
            DataError::InvalidFormat(format!(
                "line {} has {} fields, expected {}",
                line, len, expected_len
            ))
        }
        csv::ErrorKind::Utf8 { .. } => {
            DataError::InvalidFormat("input is not valid UTF-8 text".to_string())
        }
        _ => DataError::InvalidFormat(err.to_string()),
    }
}
