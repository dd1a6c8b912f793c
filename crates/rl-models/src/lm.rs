//! Simple linear regression
//!
//! Ordinary least squares with one numeric predictor and an intercept:
//! - [`ols`] estimates the model from the complete rows of a DataFrame
//! - [`result`] holds the fitted model and answers predictions
//! - [`diagnostics`] derives plot series, normal Q-Q points and influence measures

pub mod diagnostics;
pub mod ols;
pub mod result;

#[cfg(test)]
mod tests;

pub use diagnostics::{
    CookOutlier, DiagnosticResults, Diagnostics, LeveragePoint, PlotSeries, QqPoint,
};
pub use ols::{SimpleLinearRegression, INTERCEPT_NAME, MIN_OBSERVATIONS};
pub use result::{IntervalKind, LinearRegressionResult, PredictionInterval};

use serde::{Deserialize, Serialize};

use crate::base::{ModelError, Result};
use rl_core::data::DataFrame;

/// A fitted simple linear regression
pub type FittedModel = LinearRegressionResult;

/// Linear model configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Confidence level for coefficient intervals
    pub confidence_level: f64,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            confidence_level: 0.95,
        }
    }
}

impl RegressionConfig {
    /// Check that the confidence level lies strictly between 0 and 1
    pub fn validate(&self) -> Result<()> {
        validate_level(self.confidence_level)
    }
}

pub(crate) fn validate_level(level: f64) -> Result<()> {
    if level > 0.0 && level < 1.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidConfig {
            message: format!("confidence level must be in (0, 1), got {}", level),
        })
    }
}

/// Fit `response ~ predictor` with the default configuration
pub fn fit(data: &DataFrame, predictor: &str, response: &str) -> Result<FittedModel> {
    SimpleLinearRegression::new(predictor, response)
        .data(data)
        .fit()?
        .into_result()
        .ok_or(ModelError::NotFitted)
}

/// Point prediction `b0 + b1·x` from a fitted model
pub fn predict(model: &FittedModel, x: f64) -> f64 {
    model.predict(x)
}
