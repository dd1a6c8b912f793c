//! DataFrame implementation for tabular data
//!
//! A DataFrame is an ordered set of uniquely named columns of equal length.
//! It is built once by the loaders and then only read.

use super::*;

use indexmap::IndexMap;

/// Main DataFrame structure
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    pub(crate) columns: IndexMap<String, Series>,
    pub(crate) nrows: usize,
}

/// Complete-case view of two numeric columns
#[derive(Clone, Debug, PartialEq)]
pub struct CompletePairs {
    /// Original row index of each kept observation
    pub rows: Vec<usize>,
    pub x: FloatArray,
    pub y: FloatArray,
}

impl CompletePairs {
    /// Number of complete observations
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl DataFrame {
    /// Create an empty DataFrame
    pub fn new() -> Self {
        Self::default()
    }

    /// Create DataFrame from columns
    pub fn from_columns<I, S>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Series)>,
        S: Into<String>,
    {
        let mut builder = DataFrameBuilder::new();

        for (name, series) in columns.into_iter() {
            builder = builder.with_column(name, series)?;
        }

        builder.build()
    }

    /// Get the shape of the DataFrame (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.columns.len())
    }

    /// Get the number of rows
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Get the number of columns
    pub fn ncols(&self) -> usize {
        self.columns.len()
    }

    /// Get column names
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over `(name, column)` pairs in column order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Series)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a column or fail with `ColumnNotFound`
    pub fn column(&self, name: &str) -> Result<&Series> {
        self.columns
            .get(name)
            .ok_or_else(|| DataError::ColumnNotFound(name.to_string()))
    }

    /// Check whether the named column is numeric
    pub fn is_numeric(&self, name: &str) -> Result<bool> {
        Ok(self.column(name)?.is_numeric())
    }

    /// Names of the numeric columns, in column order
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, s)| s.is_numeric())
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Numeric values of a column (`NaN` where missing)
    pub fn column_values(&self, name: &str) -> Result<&FloatArray> {
        let series = self.column(name)?;
        series.as_float().ok_or_else(|| DataError::TypeMismatch {
            column: name.to_string(),
            expected: ColumnType::Numeric.name(),
            actual: series.dtype(),
        })
    }

    /// Rows where both numeric columns are present
    pub fn complete_pairs(&self, x: &str, y: &str) -> Result<CompletePairs> {
        let xs = self.column_values(x)?;
        let ys = self.column_values(y)?;

        let (rows, x, y) = pairwise_complete(xs, ys);

        Ok(CompletePairs {
            rows,
            x: FloatArray::from(x),
            y: FloatArray::from(y),
        })
    }
}

impl std::fmt::Display for DataFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DataFrame({} rows × {} cols)", self.nrows, self.ncols())
    }
}
