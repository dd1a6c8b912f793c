//! Statistical structures for model results

use serde::{Deserialize, Serialize};

/// Goodness-of-fit statistics of a simple linear regression
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModelStatistics {
    /// Number of complete observations used
    pub n_obs: usize,
    /// R-squared
    pub r_squared: f64,
    /// Adjusted R-squared
    pub adj_r_squared: f64,
    /// Residual standard error
    pub residual_std_error: f64,
    /// F-statistic
    pub f_statistic: f64,
    /// F-statistic p-value (right tail)
    pub f_p_value: f64,
    /// Residual degrees of freedom
    pub df_residual: usize,
    /// Model degrees of freedom
    pub df_model: usize,
    /// Residual sum of squares
    pub rss: f64,
    /// Total sum of squares
    pub tss: f64,
}

/// Residual statistics
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResidualStatistics {
    /// Minimum residual
    pub min: f64,
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Maximum residual
    pub max: f64,
    /// Mean residual
    pub mean: f64,
    /// Sample standard deviation (n - 1)
    pub std_dev: f64,
}
