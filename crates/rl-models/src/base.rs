//! Core types shared by the model results
//!
//! Coefficient rows and the fit / residual statistics that the narrative and
//! the report are built from.

pub use coefficient::Coefficient;
pub use statistics::{ModelStatistics, ResidualStatistics};

pub use crate::error::ModelError;

pub mod coefficient;
pub mod statistics;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
