//! Linear regression result structure
//!
//! A fitted model keeps the complete rows it was estimated from, so plot series,
//! diagnostics and predictions can all be derived without the source DataFrame.

use log::warn;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};
use std::fmt;

use crate::base::{Coefficient, ModelError, ModelStatistics, Result};
use crate::lm::ols::Vector;
use crate::lm::validate_level;

/// OLS simple linear regression result
#[derive(Debug, Clone)]
pub struct LinearRegressionResult {
    /// Predictor column name
    pub predictor: String,
    /// Response column name
    pub response: String,
    /// Intercept followed by slope
    pub coefficients: Vec<Coefficient>,
    /// Fitted values (ŷ)
    pub fitted_values: Vector,
    /// Residuals (y - ŷ)
    pub residuals: Vector,
    /// Hat matrix diagonal (leverage)
    pub hat_diagonal: Vector,
    /// Cook's distances
    pub cooks_distance: Vector,
    /// Predictor values of the complete rows
    pub x: Vector,
    /// Response values of the complete rows
    pub y: Vector,
    /// Source row index of each complete row
    pub rows: Vec<usize>,
    /// Rows dropped for a missing predictor or response
    pub n_excluded: usize,
    /// Model statistics
    pub model_statistics: ModelStatistics,
    /// Confidence level of the coefficient intervals
    pub confidence_level: f64,
}

/// Which uncertainty a [`PredictionInterval`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalKind {
    /// Interval for the mean response at x
    Confidence,
    /// Interval for a new observation at x
    Prediction,
}

/// Point prediction with an interval
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionInterval {
    pub x: f64,
    pub fit: f64,
    pub lower: f64,
    pub upper: f64,
    pub level: f64,
    pub kind: IntervalKind,
}

impl LinearRegressionResult {
    /// Intercept coefficient
    pub fn intercept(&self) -> &Coefficient {
        &self.coefficients[0]
    }

    /// Slope coefficient
    pub fn slope(&self) -> &Coefficient {
        &self.coefficients[1]
    }

    /// Get the number of observations
    pub fn n_obs(&self) -> usize {
        self.model_statistics.n_obs
    }

    /// R-squared
    pub fn r_squared(&self) -> f64 {
        self.model_statistics.r_squared
    }

    /// Residual standard error
    pub fn residual_std_error(&self) -> f64 {
        self.model_statistics.residual_std_error
    }

    /// Smallest and largest observed predictor value
    pub fn x_range(&self) -> (f64, f64) {
        self.x.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        })
    }

    /// Point prediction `b0 + b1·x`
    ///
    /// Values outside the observed predictor range are still answered; a
    /// warning is logged.
    pub fn predict(&self, x: f64) -> f64 {
        let (lo, hi) = self.x_range();
        if x < lo || x > hi {
            warn!(
                "predicting {} at {} = {}, outside the observed range [{}, {}]",
                self.response, self.predictor, x, lo, hi
            );
        }
        self.intercept().estimate + self.slope().estimate * x
    }

    /// Predictions for several predictor values
    pub fn predict_many(&self, xs: &[f64]) -> Vector {
        xs.iter().map(|&x| self.predict(x)).collect()
    }

    /// Prediction with a confidence or prediction interval at `level`
    pub fn predict_interval(
        &self,
        x: f64,
        level: f64,
        kind: IntervalKind,
    ) -> Result<PredictionInterval> {
        validate_level(level)?;

        let fit = self.predict(x);
        let n = self.n_obs() as f64;
        let x_mean = self.x.mean().unwrap_or(f64::NAN);
        let sxx: f64 = self.x.iter().map(|&xi| (xi - x_mean).powi(2)).sum();
        let h = 1.0 / n + (x - x_mean).powi(2) / sxx;

        let sigma = self.residual_std_error();
        let se = match kind {
            IntervalKind::Confidence => sigma * h.sqrt(),
            IntervalKind::Prediction => sigma * (1.0 + h).sqrt(),
        };

        let df = self.model_statistics.df_residual as f64;
        let t_dist = StudentsT::new(0.0, 1.0, df)
            .map_err(|e| ModelError::numerical("predict_interval", e))?;
        let t_critical = t_dist.inverse_cdf(1.0 - (1.0 - level) / 2.0);

        Ok(PredictionInterval {
            x,
            fit,
            lower: fit - t_critical * se,
            upper: fit + t_critical * se,
            level,
            kind,
        })
    }

    /// Residuals divided by σ̂·sqrt(1 - h)
    pub fn standardized_residuals(&self) -> Vector {
        let sigma = self.residual_std_error();
        self.residuals
            .iter()
            .zip(self.hat_diagonal.iter())
            .map(|(&r, &h)| r / (sigma * (1.0 - h).sqrt()))
            .collect()
    }
}

impl fmt::Display for LinearRegressionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = &self.model_statistics;
        writeln!(f, "{} ~ {}", self.response, self.predictor)?;
        for coef in &self.coefficients {
            writeln!(
                f,
                "  {:<14} {:>12.4} {:>10.4} {:>8.3} {:>10.3e}",
                coef.name, coef.estimate, coef.std_error, coef.t_stat, coef.p_value
            )?;
        }
        write!(
            f,
            "  R² = {:.4}, adj. R² = {:.4}, σ̂ = {:.4} on {} df",
            stats.r_squared, stats.adj_r_squared, stats.residual_std_error, stats.df_residual
        )
    }
}
