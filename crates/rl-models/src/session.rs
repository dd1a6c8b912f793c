//! Analysis session state
//!
//! A session owns the current dataset, the chosen predictor and response, and
//! the model fitted for that choice. Replacing the dataset clears the
//! selection and the model; changing the selection clears the model.

use indexmap::IndexMap;
use log::debug;

use crate::base::{ModelError, Result};
use crate::lm::{FittedModel, RegressionConfig, SimpleLinearRegression};
use crate::narrative::{classify, NarrativeReport, NarrativeThresholds};
use crate::report::SummaryRecord;
use rl_core::data::{load, CsvOptions, DataError, DataFrame, DataSource};
use rl_core::summary::{correlation_matrix, summarize, ColumnSummary, CorrelationMatrix};


/// Predictor and response column names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSelection {
    pub predictor: String,
    pub response: String,
}

impl VariableSelection {
    pub fn new(predictor: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            predictor: predictor.into(),
            response: response.into(),
        }
    }

    /// Both columns must exist in `data` and be numeric
    pub fn validate(&self, data: &DataFrame) -> Result<()> {
        for name in [&self.predictor, &self.response] {
            let series = data.column(name)?;
            if !series.is_numeric() {
                return Err(DataError::TypeMismatch {
                    column: name.clone(),
                    expected: "numeric",
                    actual: series.dtype(),
                }
                .into());
            }
        }
        Ok(())
    }
}

/// Dataset, selection and fitted model of one analysis
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    dataset: DataFrame,
    selection: Option<VariableSelection>,
    model: Option<FittedModel>,
    config: RegressionConfig,
    thresholds: NarrativeThresholds,
}

impl AnalysisSession {
    /// Start a session on `dataset` with default settings
    pub fn new(dataset: DataFrame) -> Self {
        Self {
            dataset,
            selection: None,
            model: None,
            config: RegressionConfig::default(),
            thresholds: NarrativeThresholds::default(),
        }
    }

    /// Start a session on a loaded source
    pub fn from_source(source: &DataSource, options: &CsvOptions) -> Result<Self> {
        Ok(Self::new(load(source, options)?))
    }

    /// Use the given regression and narrative settings
    pub fn with_settings(
        mut self,
        config: RegressionConfig,
        thresholds: NarrativeThresholds,
    ) -> Result<Self> {
        config.validate()?;
        thresholds.validate()?;
        self.config = config;
        self.thresholds = thresholds;
        self.model = None;
        Ok(self)
    }

    pub fn dataset(&self) -> &DataFrame {
        &self.dataset
    }

    pub fn selection(&self) -> Option<&VariableSelection> {
        self.selection.as_ref()
    }

    pub fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    pub fn thresholds(&self) -> &NarrativeThresholds {
        &self.thresholds
    }

    /// Swap in a new dataset, discarding the selection and the model
    pub fn replace_dataset(&mut self, dataset: DataFrame) {
        debug!("replacing dataset with {}", dataset);
        self.dataset = dataset;
        self.selection = None;
        self.model = None;
    }

    /// Load `source` and make it the current dataset; on error nothing changes
    pub fn load(&mut self, source: &DataSource, options: &CsvOptions) -> Result<()> {
        let dataset = load(source, options)?;
        self.replace_dataset(dataset);
        Ok(())
    }

    /// Column names in dataset order
    pub fn column_names(&self) -> Vec<String> {
        rl_core::data::column_names(&self.dataset)
    }

    /// Names of the numeric columns, the only valid regression variables
    pub fn numeric_columns(&self) -> Vec<String> {
        rl_core::data::numeric_column_names(&self.dataset)
    }

    pub fn summarize(&self) -> IndexMap<String, ColumnSummary> {
        summarize(&self.dataset)
    }

    pub fn correlation(&self) -> Result<CorrelationMatrix> {
        Ok(correlation_matrix(&self.dataset)?)
    }

    /// Choose predictor and response; the previous model is discarded
    pub fn select(&mut self, predictor: &str, response: &str) -> Result<()> {
        let selection = VariableSelection::new(predictor, response);
        selection.validate(&self.dataset)?;
        self.selection = Some(selection);
        self.model = None;
        Ok(())
    }

    /// Fit the selected variables on the current dataset
    pub fn run_regression(&mut self) -> Result<&FittedModel> {
        let selection = self.selection.as_ref().ok_or(ModelError::NoSelection)?;
        let fitted = SimpleLinearRegression::new(&selection.predictor, &selection.response)
            .data(&self.dataset)
            .config(self.config)
            .fit()?
            .into_result()
            .ok_or(ModelError::NotFitted)?;
        Ok(self.model.insert(fitted))
    }

    fn fitted(&self) -> Result<&FittedModel> {
        self.model.as_ref().ok_or(ModelError::NotFitted)
    }

    /// Point prediction from the current model
    pub fn predict(&self, x: f64) -> Result<f64> {
        Ok(self.fitted()?.predict(x))
    }

    pub fn narrative(&self) -> Result<NarrativeReport> {
        Ok(classify(self.fitted()?, &self.thresholds))
    }

    pub fn summary_record(&self) -> Result<SummaryRecord> {
        let model = self.fitted()?;
        let narrative = classify(model, &self.thresholds);
        Ok(SummaryRecord::new(model, &narrative))
    }

    /// Text report of the current model
    pub fn report_text(&self) -> Result<String> {
        Ok(self.summary_record()?.to_text())
    }
}
