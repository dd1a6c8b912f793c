//! Error classification shared across the RegLens crates

use std::fmt;

use serde::Serialize;

use crate::data::DataError;

/// Coarse failure category reported to the presentation layer.
///
/// Every error raised by the data layer or the models maps onto one of these
/// tags, so callers can branch on the category without matching on the full
/// error enums.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ErrorKind {
    /// Malformed, empty or non-tabular input
    InvalidFormat,
    /// Too few rows or columns for the requested operation
    InsufficientData,
    /// Degenerate predictor variance
    SingularFit,
    /// Non-numeric column used where numbers are required
    TypeMismatch,
    /// Unknown column or dataset name
    NotFound,
    /// Anything else (configuration, numerical library failures, ...)
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidFormat => "invalid format",
            ErrorKind::InsufficientData => "insufficient data",
            ErrorKind::SingularFit => "singular fit",
            ErrorKind::TypeMismatch => "type mismatch",
            ErrorKind::NotFound => "not found",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

impl DataError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::InvalidFormat(_) | DataError::DimensionMismatch { .. } => {
                ErrorKind::InvalidFormat
            }
            DataError::DuplicateColumn(_) => ErrorKind::InvalidFormat,
            DataError::UnknownDataset(_) | DataError::ColumnNotFound(_) => ErrorKind::NotFound,
            DataError::TypeMismatch { .. } | DataError::NonNumericData(_) => ErrorKind::TypeMismatch,
            DataError::InsufficientData { .. } => ErrorKind::InsufficientData,
        }
    }
}
