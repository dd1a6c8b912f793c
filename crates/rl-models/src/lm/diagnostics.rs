//! Linear model diagnostics
//!
//! Series for the scatter and residual plots, normal Q-Q points, residual
//! summaries and the influence measures derived from leverage and Cook's
//! distance.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

use crate::base::{ModelError, ResidualStatistics, Result};
use crate::lm::result::LinearRegressionResult;
use rl_core::data::quantile;

/// Diagnostic results
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticResults {
    /// Summary of the residuals
    pub residual_statistics: ResidualStatistics,
    /// Normal Q-Q points of the residuals
    pub qq_points: Vec<QqPoint>,
    /// Cook's distance outliers
    pub cooks_outliers: Vec<CookOutlier>,
    /// High leverage points
    pub high_leverage: Vec<LeveragePoint>,
}

/// Per-row values behind the scatter, fitted-line and residual plots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSeries {
    pub x_label: String,
    pub y_label: String,
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub fitted: Vec<f64>,
    pub residuals: Vec<f64>,
}

/// One point of a normal Q-Q plot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QqPoint {
    /// Standard normal quantile
    pub theoretical: f64,
    /// Sorted residual
    pub sample: f64,
}

/// Cook's distance outlier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CookOutlier {
    /// Source row index
    pub row: usize,
    pub distance: f64,
    pub threshold: f64,
}

/// High leverage point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeveragePoint {
    /// Source row index
    pub row: usize,
    pub leverage: f64,
    pub threshold: f64,
}

/// Diagnostic analyzer
pub struct Diagnostics;

impl Diagnostics {
    /// Min, quartiles, mean and sample standard deviation of the residuals
    pub fn residual_statistics(residuals: &Array1<f64>) -> ResidualStatistics {
        let min = residuals.iter().fold(f64::INFINITY, |a, &b| a.min(b));
        let max = residuals.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b));
        let std_dev = if residuals.len() > 1 {
            residuals.std(1.0)
        } else {
            f64::NAN
        };

        ResidualStatistics {
            min,
            q1: quantile(residuals, 0.25).unwrap_or(f64::NAN),
            median: quantile(residuals, 0.5).unwrap_or(f64::NAN),
            q3: quantile(residuals, 0.75).unwrap_or(f64::NAN),
            max,
            mean: residuals.mean().unwrap_or(f64::NAN),
            std_dev,
        }
    }

    /// Plotting positions `(i - a) / (n + 1 - 2a)`, a = 3/8 for n ≤ 10 else 1/2
    pub fn ppoints(n: usize) -> Vec<f64> {
        let a = if n <= 10 { 3.0 / 8.0 } else { 0.5 };
        (1..=n)
            .map(|i| (i as f64 - a) / (n as f64 + 1.0 - 2.0 * a))
            .collect()
    }

    /// Sorted residuals against standard normal quantiles
    pub fn qq_points(residuals: &Array1<f64>) -> Result<Vec<QqPoint>> {
        let normal =
            Normal::new(0.0, 1.0).map_err(|e| ModelError::numerical("qq_points", e))?;

        let mut sorted = residuals.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        Ok(Self::ppoints(sorted.len())
            .into_iter()
            .zip(sorted)
            .map(|(p, sample)| QqPoint {
                theoretical: normal.inverse_cdf(p),
                sample,
            })
            .collect())
    }

    /// Run all diagnostics
    pub fn run_all(result: &LinearRegressionResult) -> Result<DiagnosticResults> {
        Ok(DiagnosticResults {
            residual_statistics: Self::residual_statistics(&result.residuals),
            qq_points: Self::qq_points(&result.residuals)?,
            cooks_outliers: Self::cooks_outliers(result),
            high_leverage: Self::high_leverage(result),
        })
    }

    /// Rows with Cook's distance above 4/N
    pub fn cooks_outliers(result: &LinearRegressionResult) -> Vec<CookOutlier> {
        let cooks = &result.cooks_distance;
        let threshold = 4.0 / cooks.len() as f64;
        cooks
            .iter()
            .zip(&result.rows)
            .filter(|(d, _)| **d > threshold)
            .map(|(&d, &row)| CookOutlier {
                row,
                distance: d,
                threshold,
            })
            .collect()
    }

    /// Rows with leverage above 2p/N
    pub fn high_leverage(result: &LinearRegressionResult) -> Vec<LeveragePoint> {
        let hat_diag = &result.hat_diagonal;
        let p = result.coefficients.len();
        let threshold = 2.0 * p as f64 / hat_diag.len() as f64;
        hat_diag
            .iter()
            .zip(&result.rows)
            .filter(|(h, _)| **h > threshold)
            .map(|(&h, &row)| LeveragePoint {
                row,
                leverage: h,
                threshold,
            })
            .collect()
    }
}

impl LinearRegressionResult {
    /// Series for the scatter plot with fitted line and the residual plot
    pub fn plot_series(&self) -> PlotSeries {
        PlotSeries {
            x_label: self.predictor.clone(),
            y_label: self.response.clone(),
            x: self.x.to_vec(),
            y: self.y.to_vec(),
            fitted: self.fitted_values.to_vec(),
            residuals: self.residuals.to_vec(),
        }
    }

    /// Normal Q-Q points of the residuals
    pub fn qq_points(&self) -> Result<Vec<QqPoint>> {
        Diagnostics::qq_points(&self.residuals)
    }

    /// Summary of the residuals
    pub fn residual_statistics(&self) -> ResidualStatistics {
        Diagnostics::residual_statistics(&self.residuals)
    }

    /// Rows whose Cook's distance exceeds 4/N
    pub fn influential_points(&self) -> Vec<CookOutlier> {
        Diagnostics::cooks_outliers(self)
    }

    /// Rows whose leverage exceeds 2p/N
    pub fn high_leverage_points(&self) -> Vec<LeveragePoint> {
        Diagnostics::high_leverage(self)
    }
}
