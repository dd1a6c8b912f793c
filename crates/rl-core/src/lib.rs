//! Core data layer for RegLens
//!
//! Provides the typed column store used by the regression engine, dataset
//! loading from CSV bytes or the bundled datasets, and descriptive summaries.

pub mod data;
pub mod error;
pub mod summary;

pub use data::{DataError, DataFrame, DataSource, Series};
pub use error::ErrorKind;
