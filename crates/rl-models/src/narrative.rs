//! Qualitative judgments about a fitted model
//!
//! [`classify`] maps residual, fit and significance statistics onto fixed
//! labels with a one-sentence explanation each. Comparisons are written so a
//! `NaN` statistic always lands in the less favourable branch.

use serde::{Deserialize, Serialize};

use crate::base::{ModelError, Result};
use crate::lm::FittedModel;


/// Cut-offs used by [`classify`]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NarrativeThresholds {
    /// Largest |mean residual| still reported as unbiased (exclusive)
    pub bias_tolerance: f64,
    /// Residual standard deviation below which residuals count as tight
    pub spread_limit: f64,
    /// R² at or above which predictive power is strong
    pub strong_r_squared: f64,
    /// R² at or above which predictive power is acceptable
    pub acceptable_r_squared: f64,
    /// p-value below which the overall F-test is significant
    pub model_significance: f64,
    /// p-value below which a coefficient is significant
    pub coefficient_significance: f64,
}

impl Default for NarrativeThresholds {
    fn default() -> Self {
        Self {
            bias_tolerance: 1e-5,
            spread_limit: 1.0,
            strong_r_squared: 0.7,
            acceptable_r_squared: 0.4,
            model_significance: 0.05,
            coefficient_significance: 0.05,
        }
    }
}

impl NarrativeThresholds {
    /// Reject orderings that would make a band unreachable
    pub fn validate(&self) -> Result<()> {
        if self.acceptable_r_squared > self.strong_r_squared {
            return Err(ModelError::InvalidConfig {
                message: format!(
                    "acceptable R² threshold {} exceeds strong threshold {}",
                    self.acceptable_r_squared, self.strong_r_squared
                ),
            });
        }
        for (name, value) in [
            ("bias_tolerance", self.bias_tolerance),
            ("spread_limit", self.spread_limit),
            ("model_significance", self.model_significance),
            ("coefficient_significance", self.coefficient_significance),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(ModelError::InvalidConfig {
                    message: format!("{} must be non-negative, got {}", name, value),
                });
            }
        }
        Ok(())
    }
}

/// Whether the residuals are centred on zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bias {
    #[serde(rename = "no significant bias")]
    NoSignificantBias,
    #[serde(rename = "potential bias")]
    PotentialBias,
}

impl Bias {
    /// Unbiased when `|mean| < bias_tolerance`
    pub fn assess(residual_mean: f64, thresholds: &NarrativeThresholds) -> Self {
        if residual_mean.abs() < thresholds.bias_tolerance {
            Bias::NoSignificantBias
        } else {
            Bias::PotentialBias
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bias::NoSignificantBias => "no significant bias",
            Bias::PotentialBias => "potential bias",
        }
    }
}

/// How widely the residuals scatter around the fitted line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Spread {
    #[serde(rename = "tightly clustered")]
    TightlyClustered,
    #[serde(rename = "larger variability")]
    LargerVariability,
}

impl Spread {
    pub fn assess(residual_std_dev: f64, thresholds: &NarrativeThresholds) -> Self {
        if residual_std_dev < thresholds.spread_limit {
            Spread::TightlyClustered
        } else {
            Spread::LargerVariability
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Spread::TightlyClustered => "tightly clustered",
            Spread::LargerVariability => "larger variability",
        }
    }
}

/// Band of R²
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictivePower {
    #[serde(rename = "strong")]
    Strong,
    #[serde(rename = "acceptable")]
    Acceptable,
    #[serde(rename = "weak")]
    Weak,
}

impl PredictivePower {
    /// Bands are closed at the lower end
    pub fn assess(r_squared: f64, thresholds: &NarrativeThresholds) -> Self {
        if r_squared >= thresholds.strong_r_squared {
            PredictivePower::Strong
        } else if r_squared >= thresholds.acceptable_r_squared {
            PredictivePower::Acceptable
        } else {
            PredictivePower::Weak
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PredictivePower::Strong => "strong",
            PredictivePower::Acceptable => "acceptable",
            PredictivePower::Weak => "weak",
        }
    }
}

/// Outcome of the overall F-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelSignificance {
    #[serde(rename = "statistically significant overall")]
    SignificantOverall,
    #[serde(rename = "not statistically significant")]
    NotSignificant,
}

impl ModelSignificance {
    pub fn assess(f_p_value: f64, thresholds: &NarrativeThresholds) -> Self {
        if f_p_value < thresholds.model_significance {
            ModelSignificance::SignificantOverall
        } else {
            ModelSignificance::NotSignificant
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelSignificance::SignificantOverall => "statistically significant overall",
            ModelSignificance::NotSignificant => "not statistically significant",
        }
    }
}

/// Outcome of a coefficient t-test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Significance {
    #[serde(rename = "statistically significant")]
    Significant,
    #[serde(rename = "not statistically significant")]
    NotSignificant,
}

impl Significance {
    pub fn label(&self) -> &'static str {
        match self {
            Significance::Significant => "statistically significant",
            Significance::NotSignificant => "not statistically significant",
        }
    }

    /// Significant when `p_value < alpha`
    pub fn from_p_value(p_value: f64, alpha: f64) -> Self {
        if p_value < alpha {
            Significance::Significant
        } else {
            Significance::NotSignificant
        }
    }
}

/// Judgment on one coefficient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientJudgment {
    pub name: String,
    pub estimate: f64,
    pub p_value: f64,
    pub significance: Significance,
    pub is_intercept: bool,
}

/// All judgments for one fitted model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeReport {
    pub residual_mean: f64,
    pub bias: Bias,
    pub residual_std_dev: f64,
    pub spread: Spread,
    pub r_squared: f64,
    pub predictive_power: PredictivePower,
    pub f_p_value: f64,
    pub model_significance: ModelSignificance,
    pub coefficients: Vec<CoefficientJudgment>,
}

/// Classify a fitted model against `thresholds`
pub fn classify(model: &FittedModel, thresholds: &NarrativeThresholds) -> NarrativeReport {
    let residual_mean = model.residuals.mean().unwrap_or(f64::NAN);
    let residual_std_dev = if model.residuals.len() > 1 {
        model.residuals.std(1.0)
    } else {
        f64::NAN
    };
    let r_squared = model.model_statistics.r_squared;
    let f_p_value = model.model_statistics.f_p_value;

    let bias = Bias::assess(residual_mean, thresholds);
    let spread = Spread::assess(residual_std_dev, thresholds);
    let predictive_power = PredictivePower::assess(r_squared, thresholds);
    let model_significance = ModelSignificance::assess(f_p_value, thresholds);

    let coefficients = model
        .coefficients
        .iter()
        .map(|c| CoefficientJudgment {
            name: c.name.clone(),
            estimate: c.estimate,
            p_value: c.p_value,
            significance: Significance::from_p_value(
                c.p_value,
                thresholds.coefficient_significance,
            ),
            is_intercept: c.is_intercept,
        })
        .collect();

    NarrativeReport {
        residual_mean,
        bias,
        residual_std_dev,
        spread,
        r_squared,
        predictive_power,
        f_p_value,
        model_significance,
        coefficients,
    }
}

impl NarrativeReport {
    pub fn bias_sentence(&self) -> String {
        match self.bias {
            Bias::NoSignificantBias => format!(
                "The residuals average {:.3e}, so there is no significant bias in the fit.",
                self.residual_mean
            ),
            Bias::PotentialBias => format!(
                "The residuals average {:.3e}, which points to potential bias in the fit.",
                self.residual_mean
            ),
        }
    }

    pub fn spread_sentence(&self) -> String {
        match self.spread {
            Spread::TightlyClustered => format!(
                "With a residual standard deviation of {:.3}, the observations are tightly clustered around the fitted line.",
                self.residual_std_dev
            ),
            Spread::LargerVariability => format!(
                "With a residual standard deviation of {:.3}, the observations show larger variability around the fitted line.",
                self.residual_std_dev
            ),
        }
    }

    pub fn predictive_power_sentence(&self) -> String {
        format!(
            "An R-squared of {:.3} indicates {} predictive power.",
            self.r_squared,
            self.predictive_power.label()
        )
    }

    pub fn model_significance_sentence(&self) -> String {
        format!(
            "The F-test p-value of {:.3e} means the model is {}.",
            self.f_p_value,
            self.model_significance.label()
        )
    }

    pub fn coefficient_sentence(judgment: &CoefficientJudgment) -> String {
        let subject = if judgment.is_intercept {
            "The intercept".to_string()
        } else {
            format!("The slope for {}", judgment.name)
        };
        format!(
            "{} ({:.3}) is {} (p = {:.3e}).",
            subject,
            judgment.estimate,
            judgment.significance.label(),
            judgment.p_value
        )
    }

    /// Every explanation sentence, in report order
    pub fn sentences(&self) -> Vec<String> {
        let mut sentences = vec![
            self.bias_sentence(),
            self.spread_sentence(),
            self.predictive_power_sentence(),
            self.model_significance_sentence(),
        ];
        sentences.extend(self.coefficients.iter().map(Self::coefficient_sentence));
        sentences
    }
}
