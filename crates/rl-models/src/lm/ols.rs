//! Ordinary Least Squares (OLS) with a single predictor
//!
//! Estimates `response = β₀ + β₁·predictor + ε` from the rows of a DataFrame
//! where both variables are present, together with the usual inference
//! statistics under homoscedastic normal errors.

use log::{debug, warn};
use ndarray::{Array1, Array2};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

use crate::base::{Coefficient, ModelError, ModelStatistics, Result};
use crate::lm::result::LinearRegressionResult;
use crate::lm::RegressionConfig;
use rl_core::data::DataFrame;

// ==================== Type Definitions ====================

/// Matrix type alias for 2D arrays
pub type Matrix = Array2<f64>;

/// Vector type alias for 1D arrays
pub type Vector = Array1<f64>;

/// Fewest complete rows that leave a residual degree of freedom
pub const MIN_OBSERVATIONS: usize = 3;

/// Name given to the intercept coefficient
pub const INTERCEPT_NAME: &str = "(Intercept)";

/// Number of estimated parameters (intercept and slope)
const N_PARAMS: usize = 2;

/// Lower bound on coefficient standard errors
const MIN_STD_ERROR: f64 = 1e-10;

// ==================== Simple Linear Regression ====================

/// OLS simple linear regression model
///
/// ```ignore
/// let model = SimpleLinearRegression::new("wt", "mpg").data(&df).fit()?;
/// let result = model.result().unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SimpleLinearRegression {
    /// Predictor column
    predictor: String,
    /// Response column
    response: String,
    /// Data
    data: Option<DataFrame>,
    /// Configuration
    config: RegressionConfig,
    /// Fitted result
    result: Option<LinearRegressionResult>,
}

impl SimpleLinearRegression {
    /// Create a new model for `response ~ predictor`
    pub fn new(predictor: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            predictor: predictor.into(),
            response: response.into(),
            data: None,
            config: RegressionConfig::default(),
            result: None,
        }
    }

    /// Set data for the model
    pub fn data(mut self, data: &DataFrame) -> Self {
        self.data = Some(data.clone());
        self.result = None;
        self
    }

    /// Set configuration
    pub fn config(mut self, config: RegressionConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the confidence level of coefficient intervals
    pub fn confidence_level(mut self, level: f64) -> Self {
        self.config.confidence_level = level;
        self
    }

    /// Fitted result, if [`fit`](Self::fit) succeeded
    pub fn result(&self) -> Option<&LinearRegressionResult> {
        self.result.as_ref()
    }

    /// Consume the model and return the fitted result
    pub fn into_result(self) -> Option<LinearRegressionResult> {
        self.result
    }

    /// Estimated intercept and slope
    pub fn coefficients(&self) -> Option<&[Coefficient]> {
        self.result.as_ref().map(|r| r.coefficients.as_slice())
    }

    /// Fit the OLS model
    pub fn fit(mut self) -> Result<Self> {
        self.config.validate()?;
        let data = self.data.as_ref().ok_or(ModelError::NoData)?;

        let pairs = data.complete_pairs(&self.predictor, &self.response)?;
        let n = pairs.len();

        let excluded = data.nrows() - n;
        if excluded > 0 {
            warn!(
                "dropped {} of {} rows with a missing '{}' or '{}'",
                excluded,
                data.nrows(),
                self.predictor,
                self.response
            );
        }

        if n < MIN_OBSERVATIONS {
            return Err(ModelError::InsufficientData {
                n_complete: n,
                required: MIN_OBSERVATIONS,
            });
        }

        let x = pairs.x;
        let y = pairs.y;

        let x_mean = x.mean().unwrap_or(f64::NAN);
        let y_mean = y.mean().unwrap_or(f64::NAN);
        let sxx: f64 = x.iter().map(|&xi| (xi - x_mean).powi(2)).sum();
        let sxy: f64 = x
            .iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| (xi - x_mean) * (yi - y_mean))
            .sum();
        let tss: f64 = y.iter().map(|&yi| (yi - y_mean).powi(2)).sum();
        ensure_finite(&[("Sxx", sxx), ("Sxy", sxy), ("total sum of squares", tss)])?;

        if is_constant(&x, sxx) {
            return Err(ModelError::SingularFit {
                predictor: self.predictor.clone(),
            });
        }
        let constant_response = is_constant(&y, tss);
        if constant_response {
            warn!(
                "response '{}' is constant over the complete rows",
                self.response
            );
        }

        let slope = sxy / sxx;
        let intercept = y_mean - slope * x_mean;
        let estimates = Vector::from(vec![intercept, slope]);

        let design = design_matrix(&x);
        let fitted_values = design.dot(&estimates);
        let residuals = &y - &fitted_values;

        let rss = residuals.mapv(|r| r * r).sum();
        ensure_finite(&[("residual sum of squares", rss)])?;
        let df_residual = n - N_PARAMS;
        let sigma2 = rss / df_residual as f64;
        let residual_std_error = sigma2.sqrt();

        let xtx_inv = xtx_inverse(n, x_mean, sxx);
        let standard_errors = self.standard_errors(&xtx_inv, sigma2);
        let coefficients = self.calculate_inference(&estimates, &standard_errors, df_residual)?;

        let tss = if constant_response { 0.0 } else { tss };
        let r_squared = if tss > 0.0 {
            (1.0 - rss / tss).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let adj_r_squared =
            1.0 - (1.0 - r_squared) * ((n as f64 - 1.0) / df_residual as f64);
        let (f_statistic, f_p_value) = self.f_statistic(rss, tss, df_residual)?;

        let hat_diagonal = self.hat_matrix_diagonal(&design, &xtx_inv);
        let cooks_distance =
            self.cooks_distance(&residuals, &hat_diagonal, residual_std_error);

        let model_statistics = ModelStatistics {
            n_obs: n,
            r_squared,
            adj_r_squared,
            residual_std_error,
            f_statistic,
            f_p_value,
            df_residual,
            df_model: N_PARAMS - 1,
            rss,
            tss,
        };

        debug!(
            "fitted {} ~ {} on {} rows: intercept={:.4}, slope={:.4}, R²={:.4}",
            self.response, self.predictor, n, intercept, slope, r_squared
        );

        self.result = Some(LinearRegressionResult {
            predictor: self.predictor.clone(),
            response: self.response.clone(),
            coefficients,
            fitted_values,
            residuals,
            hat_diagonal,
            cooks_distance,
            x,
            y,
            rows: pairs.rows,
            n_excluded: excluded,
            model_statistics,
            confidence_level: self.config.confidence_level,
        });

        Ok(self)
    }

    /// Standard errors = sqrt(diag(σ² (X'X)⁻¹)), floored at [`MIN_STD_ERROR`]
    fn standard_errors(&self, xtx_inv: &Matrix, sigma2: f64) -> Vector {
        let cov_matrix = xtx_inv * sigma2;
        cov_matrix.diag().mapv(|v| v.sqrt().max(MIN_STD_ERROR))
    }

    /// t-statistics, two-sided p-values and confidence intervals
    fn calculate_inference(
        &self,
        estimates: &Vector,
        std_errors: &Vector,
        df: usize,
    ) -> Result<Vec<Coefficient>> {
        let t_dist = StudentsT::new(0.0, 1.0, df as f64)
            .map_err(|e| ModelError::numerical("calculate_inference", e))?;

        let alpha = 1.0 - self.config.confidence_level;
        let t_critical = t_dist.inverse_cdf(1.0 - alpha / 2.0);

        let names = [INTERCEPT_NAME, self.predictor.as_str()];

        let coefficients = estimates
            .iter()
            .zip(std_errors.iter())
            .zip(names)
            .enumerate()
            .map(|(i, ((&estimate, &se), name))| {
                let t = estimate / se;
                let p = (2.0 * t_dist.sf(t.abs())).clamp(0.0, 1.0);

                let coefficient = Coefficient::new(name, estimate)
                    .with_std_error(se)
                    .with_t_stat(t)
                    .with_p_value(p)
                    .with_ci(estimate - t_critical * se, estimate + t_critical * se);

                if i == 0 {
                    coefficient.as_intercept()
                } else {
                    coefficient
                }
            })
            .collect();

        Ok(coefficients)
    }

    /// F-statistic for the slope and its right-tailed p-value
    fn f_statistic(&self, rss: f64, tss: f64, df_residual: usize) -> Result<(f64, f64)> {
        if tss <= 0.0 {
            return Ok((0.0, 1.0));
        }
        if rss <= 0.0 {
            return Ok((f64::INFINITY, 0.0));
        }

        let ess = (tss - rss).max(0.0);
        let df_model = (N_PARAMS - 1) as f64;
        let f_statistic = (ess / df_model) / (rss / df_residual as f64);

        let f_dist = FisherSnedecor::new(df_model, df_residual as f64)
            .map_err(|e| ModelError::numerical("f_statistic", e))?;

        Ok((f_statistic, f_dist.sf(f_statistic)))
    }

    /// Leverage: h_ii = x_i'(X'X)⁻¹x_i
    fn hat_matrix_diagonal(&self, design: &Matrix, xtx_inv: &Matrix) -> Vector {
        design
            .rows()
            .into_iter()
            .map(|xi| xi.dot(&xtx_inv.dot(&xi)))
            .collect()
    }

    /// Cook's distances; `NaN` where undefined (exact fit or h = 1)
    fn cooks_distance(&self, residuals: &Vector, hat_diag: &Vector, sigma: f64) -> Vector {
        residuals
            .iter()
            .zip(hat_diag.iter())
            .map(|(&r, &h)| {
                (r.powi(2) * h) / (N_PARAMS as f64 * sigma.powi(2) * (1.0 - h).powi(2))
            })
            .collect()
    }
}

/// Design matrix with an intercept column: rows `[1, x_i]`
pub(crate) fn design_matrix(x: &Vector) -> Matrix {
    let mut design = Matrix::ones((x.len(), N_PARAMS));
    design.column_mut(1).assign(x);
    design
}

/// (X'X)⁻¹ for the design `[1, x]`, written in centred form:
/// `[[1/n + x̄²/Sxx, -x̄/Sxx], [-x̄/Sxx, 1/Sxx]]`
pub(crate) fn xtx_inverse(n: usize, x_mean: f64, sxx: f64) -> Matrix {
    let mut inv = Matrix::zeros((N_PARAMS, N_PARAMS));
    inv[(0, 0)] = 1.0 / n as f64 + x_mean * x_mean / sxx;
    inv[(0, 1)] = -x_mean / sxx;
    inv[(1, 0)] = -x_mean / sxx;
    inv[(1, 1)] = 1.0 / sxx;
    inv
}

/// Fails with a numerical error when any sum overflowed
fn ensure_finite(sums: &[(&str, f64)]) -> Result<()> {
    match sums.iter().find(|(_, value)| !value.is_finite()) {
        Some((name, value)) => Err(ModelError::numerical(
            "fit",
            format!("{} is not finite ({})", name, value),
        )),
        None => Ok(()),
    }
}

/// All values equal, or the centred sum of squares is rounding noise
fn is_constant(values: &Vector, sum_sq_dev: f64) -> bool {
    let first = values[0];
    if values.iter().all(|&v| v == first) {
        return true;
    }
    let max_abs = values.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
    let noise = f64::EPSILON * max_abs;
    sum_sq_dev <= values.len() as f64 * noise * noise
}
