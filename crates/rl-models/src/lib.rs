//! Simple linear regression analysis for RegLens
//!
//! The pipeline is `load → fit → classify → format`:
//!
//! - [`lm`] fits ordinary least squares on one predictor and one response and
//!   derives the inference statistics and diagnostic series
//! - [`narrative`] turns the fitted statistics into fixed qualitative judgments
//! - [`report`] assembles the exportable summary record and its text form
//! - [`session`] holds the current dataset, variable selection and model for a
//!   controller driving the pipeline

pub mod base;
pub mod error;
pub mod lm;
pub mod narrative;
pub mod report;
pub mod session;

pub use base::{Coefficient, ModelStatistics, ResidualStatistics, Result};
pub use error::ModelError;
pub use lm::{fit, predict, FittedModel, RegressionConfig, SimpleLinearRegression};
pub use narrative::{classify, NarrativeReport, NarrativeThresholds};
pub use report::{to_summary_record, to_text, SummaryRecord, REPORT_FILE_NAME};
pub use session::{AnalysisSession, VariableSelection};
