//! Model-related error types

use thiserror::Error;

use rl_core::data::DataError;
use rl_core::ErrorKind;

/// Model-related errors
#[derive(Debug, Error)]
pub enum ModelError {
    /// Data-related error (unknown column, non-numeric column, bad input table)
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Too few complete observations to estimate the model
    #[error("Not enough data: {n_complete} complete rows, at least {required} required")]
    InsufficientData {
        /// Rows with both variables present
        n_complete: usize,
        /// Minimum number of rows needed
        required: usize,
    },

    /// The predictor does not vary over the complete rows
    #[error("Singular fit: predictor '{predictor}' is constant over the complete rows")]
    SingularFit {
        /// Name of the constant predictor
        predictor: String,
    },

    /// Numerical computation error
    #[error("Numerical error: {message} (operation: {operation})")]
    NumericalError {
        /// Error message
        message: String,
        /// Operation that failed
        operation: String,
    },

    /// Invalid model configuration
    #[error("Invalid model configuration: {message}")]
    InvalidConfig {
        /// Configuration error message
        message: String,
    },

    /// Fitting was requested before any data was attached
    #[error("No data provided")]
    NoData,

    /// Fitting was requested before predictor and response were chosen
    #[error("No predictor and response selected")]
    NoSelection,

    /// Model not fitted yet
    #[error("Model not fitted yet")]
    NotFitted,
}

impl ModelError {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::Data(err) => err.kind(),
            ModelError::InsufficientData { .. } => ErrorKind::InsufficientData,
            ModelError::SingularFit { .. } => ErrorKind::SingularFit,
            ModelError::NumericalError { .. }
            | ModelError::InvalidConfig { .. }
            | ModelError::NoData
            | ModelError::NoSelection
            | ModelError::NotFitted => ErrorKind::Other,
        }
    }

    pub(crate) fn numerical(operation: &str, err: impl std::fmt::Display) -> Self {
        ModelError::NumericalError {
            message: err.to_string(),
            operation: operation.to_string(),
        }
    }
}
