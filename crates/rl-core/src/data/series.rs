//! Series data structure for holding homogeneous data
//!
//! A Series is one column of a DataFrame. Columns are either numeric or
//! categorical; the type is fixed when the column is built and never changes.

use super::*;

use std::collections::HashMap;

/// A Series is a typed, one-dimensional column of data
#[derive(Clone, Debug, PartialEq)]
pub enum Series {
    /// Floating point numbers; `NaN` marks a missing value
    Float(FloatArray),
    /// Categorical data: per-row codes (`None` when missing) and the sorted levels
    Categorical(Vec<Option<u32>>, Vec<String>),
}

impl Series {
    /// Create a new Float series
    pub fn float(data: impl Into<FloatArray>) -> Self {
        Series::Float(data.into())
    }

    /// Create a new Float series where `None` is a missing value
    pub fn float_opt(data: &[Option<f64>]) -> Self {
        Series::Float(data.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
    }

    /// Create a new Categorical series without missing values
    pub fn categorical<T: AsRef<str>>(data: &[T]) -> Self {
        let values: Vec<Option<&str>> = data.iter().map(|s| Some(s.as_ref())).collect();
        Self::categorical_opt(&values)
    }

    /// Create a new Categorical series where `None` is a missing value
    pub fn categorical_opt<T: AsRef<str>>(data: &[Option<T>]) -> Self {
        let mut categories: Vec<String> = data
            .iter()
            .flatten()
            .map(|s| s.as_ref().to_string())
            .collect::<std::collections::HashSet<_>>()
            .into_iter()
            .collect();

        // Sort categories for consistent encoding
        categories.sort();

        let category_map: HashMap<&str, u32> = categories
            .iter()
            .enumerate()
            .map(|(i, cat)| (cat.as_str(), i as u32))
            .collect();

        let encoded = data
            .iter()
            .map(|s| {
                s.as_ref()
                    .and_then(|s| category_map.get(s.as_ref()).copied())
            })
            .collect();

        Series::Categorical(encoded, categories)
    }

    /// Get the length of the series
    pub fn len(&self) -> usize {
        match self {
            Series::Float(arr) => arr.len(),
            Series::Categorical(codes, _) => codes.len(),
        }
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get the type name of the series
    pub fn dtype(&self) -> &'static str {
        self.column_type().name()
    }

    /// Get the column type
    pub fn column_type(&self) -> ColumnType {
        match self {
            Series::Float(_) => ColumnType::Numeric,
            Series::Categorical(_, _) => ColumnType::Categorical,
        }
    }

    /// Check if the series holds numbers
    pub fn is_numeric(&self) -> bool {
        self.column_type().is_numeric()
    }

    /// Number of missing entries
    pub fn n_missing(&self) -> usize {
        match self {
            Series::Float(arr) => arr.iter().filter(|v| v.is_nan()).count(),
            Series::Categorical(codes, _) => codes.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Get a value at index
    pub fn get(&self, idx: usize) -> Option<SeriesValue> {
        match self {
            Series::Float(arr) => arr.get(idx).map(|&v| {
                if v.is_nan() {
                    SeriesValue::Missing
                } else {
                    SeriesValue::Float(v)
                }
            }),
            Series::Categorical(codes, cats) => codes.get(idx).map(|code| {
                code.and_then(|c| cats.get(c as usize))
                    .map(|cat| SeriesValue::String(cat.clone()))
                    .unwrap_or(SeriesValue::Missing)
            }),
        }
    }

    /// Borrow the numeric values, `None` for categorical columns
    pub fn as_float(&self) -> Option<&FloatArray> {
        match self {
            Series::Float(arr) => Some(arr),
            Series::Categorical(_, _) => None,
        }
    }

    /// Non-missing numeric values in row order
    pub fn valid_values(&self) -> Result<Vec<f64>> {
        match self {
            Series::Float(arr) => Ok(arr.iter().copied().filter(|v| !v.is_nan()).collect()),
            Series::Categorical(_, _) => Err(DataError::NonNumericData(self.dtype())),
        }
    }

    /// Frequency of each level, in level order, ignoring missing entries
    pub fn value_counts(&self) -> Option<Vec<(String, usize)>> {
        match self {
            Series::Categorical(codes, cats) => {
                let mut counts = vec![0usize; cats.len()];
                for code in codes.iter().flatten() {
                    counts[*code as usize] += 1;
                }
                Some(cats.iter().cloned().zip(counts).collect())
            }
            Series::Float(_) => None,
        }
    }

    /// Compute basic statistics for a numeric series, skipping missing values
    pub fn describe(&self) -> Result<SeriesStats> {
        let values = self.valid_values()?;
        let n_missing = self.len() - values.len();

        if values.is_empty() {
            return Ok(SeriesStats {
                n_missing,
                ..SeriesStats::empty()
            });
        }

        let arr = FloatArray::from(values);
        let mean = arr.mean().unwrap_or(f64::NAN);
        let std = if arr.len() > 1 { arr.std(1.0) } else { f64::NAN };
        let min = arr.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = arr.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));

        Ok(SeriesStats {
            count: arr.len(),
            n_missing,
            mean,
            std,
            min,
            q25: quantile(&arr, 0.25).unwrap_or(f64::NAN),
            q50: quantile(&arr, 0.5).unwrap_or(f64::NAN),
            q75: quantile(&arr, 0.75).unwrap_or(f64::NAN),
            max,
        })
    }
}

/// Quantile by linear interpolation between order statistics (R's type 7)
pub fn quantile(arr: &FloatArray, q: f64) -> Option<f64> {
    if arr.is_empty() {
        return None;
    }

    let mut sorted: Vec<f64> = arr.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let index = (n as f64 - 1.0) * q;
    let lower = index.floor() as usize;
    let upper = index.ceil() as usize;

    if lower == upper {
        Some(sorted[lower])
    } else {
        let weight = index - lower as f64;
        Some(sorted[lower] * (1.0 - weight) + sorted[upper] * weight)
    }
}

/// Statistical summary of a numeric series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    /// Number of non-missing values
    pub count: usize,
    pub n_missing: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl SeriesStats {
    pub(crate) fn empty() -> Self {
        Self {
            count: 0,
            n_missing: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q50: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Enum for type-safe value access
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesValue {
    Float(f64),
    String(String),
    Missing,
}

impl std::fmt::Display for SeriesValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesValue::Float(v) => write!(f, "{}", v),
            SeriesValue::String(v) => write!(f, "{}", v),
            SeriesValue::Missing => write!(f, "NA"),
        }
    }
}
