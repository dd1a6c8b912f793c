//! Exportable regression summary
//!
//! [`SummaryRecord`] gathers everything a reader needs about one fit. It
//! serializes with serde and renders to a fixed plain-text layout.

use serde::{Deserialize, Serialize};
use std::fmt::{self, Write};

use crate::base::ResidualStatistics;
use crate::lm::FittedModel;
use crate::narrative::{NarrativeReport, Significance};


/// File name used when the text report is exported
pub const REPORT_FILE_NAME: &str = "regression_summary.txt";

/// One row of the coefficient table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientRow {
    pub name: String,
    pub estimate: f64,
    pub std_error: f64,
    pub t_value: f64,
    pub p_value: f64,
    pub ci_lower: f64,
    pub ci_upper: f64,
    pub significance: Significance,
}

/// Summary of one fitted model with its narrative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRecord {
    pub response: String,
    pub predictor: String,
    pub n_obs: usize,
    pub n_excluded: usize,
    pub confidence_level: f64,
    pub coefficients: Vec<CoefficientRow>,
    pub residuals: ResidualStatistics,
    pub r_squared: f64,
    pub adj_r_squared: f64,
    pub residual_std_error: f64,
    pub df_residual: usize,
    pub df_model: usize,
    pub f_statistic: f64,
    pub f_p_value: f64,
    pub narrative: NarrativeReport,
}

impl SummaryRecord {
    /// Assemble the record; coefficient significance comes from `narrative`
    pub fn new(model: &FittedModel, narrative: &NarrativeReport) -> Self {
        let coefficients = model
            .coefficients
            .iter()
            .zip(&narrative.coefficients)
            .map(|(c, judgment)| CoefficientRow {
                name: c.name.clone(),
                estimate: c.estimate,
                std_error: c.std_error,
                t_value: c.t_stat,
                p_value: c.p_value,
                ci_lower: c.ci_lower,
                ci_upper: c.ci_upper,
                significance: judgment.significance,
            })
            .collect();

        let stats = &model.model_statistics;
        Self {
            response: model.response.clone(),
            predictor: model.predictor.clone(),
            n_obs: stats.n_obs,
            n_excluded: model.n_excluded,
            confidence_level: model.confidence_level,
            coefficients,
            residuals: model.residual_statistics(),
            r_squared: stats.r_squared,
            adj_r_squared: stats.adj_r_squared,
            residual_std_error: stats.residual_std_error,
            df_residual: stats.df_residual,
            df_model: stats.df_model,
            f_statistic: stats.f_statistic,
            f_p_value: stats.f_p_value,
            narrative: narrative.clone(),
        }
    }

    /// Render the plain-text report
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SummaryRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        section(f, "Regression Summary", '=')?;
        writeln!(f, "Response: {}", self.response)?;
        writeln!(f, "Predictor: {}", self.predictor)?;
        writeln!(f, "Observations: {}", self.n_obs)?;
        writeln!(f, "Rows excluded (missing values): {}", self.n_excluded)?;
        writeln!(f)?;

        section(f, "Coefficients", '-')?;
        let ci_label = format!("{}% CI", percent(self.confidence_level));
        for row in &self.coefficients {
            writeln!(f, "{}", row.name)?;
            writeln!(f, "  Estimate: {}", fixed(row.estimate))?;
            writeln!(f, "  Std. Error: {}", fixed(row.std_error))?;
            writeln!(f, "  t value: {}", fixed(row.t_value))?;
            writeln!(f, "  p-value: {}", sci(row.p_value))?;
            writeln!(
                f,
                "  {}: [{}, {}]",
                ci_label,
                fixed(row.ci_lower),
                fixed(row.ci_upper)
            )?;
            writeln!(f, "  Significance: {}", row.significance.label())?;
        }
        writeln!(f)?;

        section(f, "Residuals", '-')?;
        let r = &self.residuals;
        writeln!(f, "  Min: {}", fixed(r.min))?;
        writeln!(f, "  1st Qu.: {}", fixed(r.q1))?;
        writeln!(f, "  Median: {}", fixed(r.median))?;
        writeln!(f, "  3rd Qu.: {}", fixed(r.q3))?;
        writeln!(f, "  Max: {}", fixed(r.max))?;
        writeln!(f, "  Mean: {}", fixed(r.mean))?;
        writeln!(f, "  Std. Dev.: {}", fixed(r.std_dev))?;
        writeln!(f)?;

        section(f, "Model Fit Statistics", '-')?;
        writeln!(
            f,
            "Residual standard error: {} on {} degrees of freedom",
            fixed(self.residual_std_error),
            self.df_residual
        )?;
        writeln!(f, "R-squared: {}", fixed(self.r_squared))?;
        writeln!(f, "Adjusted R-squared: {}", fixed(self.adj_r_squared))?;
        writeln!(
            f,
            "F-statistic: {} on {} and {} DF",
            fixed(self.f_statistic),
            self.df_model,
            self.df_residual
        )?;
        writeln!(f, "F-test p-value: {}", sci(self.f_p_value))?;
        writeln!(f)?;

        section(f, "Interpretation", '-')?;
        for sentence in self.narrative.sentences() {
            writeln!(f, "- {}", sentence)?;
        }
        Ok(())
    }
}

/// Build the summary record of a fitted model
pub fn to_summary_record(model: &FittedModel, narrative: &NarrativeReport) -> SummaryRecord {
    SummaryRecord::new(model, narrative)
}

/// Render a summary record as plain text
pub fn to_text(record: &SummaryRecord) -> String {
    record.to_text()
}

fn section(out: &mut impl Write, title: &str, underline: char) -> fmt::Result {
    writeln!(out, "{}", title)?;
    writeln!(
        out,
        "{}",
        std::iter::repeat(underline)
            .take(title.chars().count())
            .collect::<String>()
    )
}

/// Three decimals; `-0.000` prints as `0.000`
pub(crate) fn fixed(value: f64) -> String {
    let s = format!("{:.3}", value);
    if s == "-0.000" {
        "0.000".to_string()
    } else {
        s
    }
}

/// Scientific notation with three decimals
pub(crate) fn sci(value: f64) -> String {
    format!("{:.3e}", value)
}

fn percent(level: f64) -> String {
    let s = format!("{:.1}", level * 100.0);
    s.strip_suffix(".0").map(str::to_string).unwrap_or(s)
}
