//! Core data structures for RegLens
//!
//! This module provides the typed column store the analysis pipeline works
//! on, together with the adapters that build it from CSV bytes or from one of
//! the bundled datasets.

mod builder;
mod builtin;
mod dataframe;
mod loader;
mod series;
mod utils;


// Re-exports
pub use builder::DataFrameBuilder;
pub use builtin::BuiltinDataset;
pub use dataframe::{CompletePairs, DataFrame};
pub use loader::{column_names, is_numeric, load, numeric_column_names, read_csv, CsvOptions, DataSource};
pub use series::{quantile, Series, SeriesStats, SeriesValue};
pub use utils::{make_unique, pairwise_complete, ColumnType};

/// Numeric column storage; `NaN` marks a missing value
pub type FloatArray = ndarray::Array1<f64>;
pub type Matrix = ndarray::Array2<f64>;

/// Error types specific to data operations
#[derive(thiserror::Error, Debug)]
pub enum DataError {
    #[error("Invalid table format: {0}")]
    InvalidFormat(String),

    #[error("Unknown built-in dataset '{0}'")]
    UnknownDataset(String),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: String, actual: String },

    #[error("Column '{column}' has type {actual}, but {expected} was expected")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    #[error("Operation requires numeric data, got {0}")]
    NonNumericData(&'static str),

    #[error("Not enough {what}: need at least {required}, got {available}")]
    InsufficientData {
        what: &'static str,
        required: usize,
        available: usize,
    },
}

/// Result type for data operations
pub type Result<T> = std::result::Result<T, DataError>;
