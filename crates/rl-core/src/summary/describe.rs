//! Per-column descriptive summaries

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::data::{DataFrame, Series};

/// Summary of a numeric column; missing values are excluded
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub n_missing: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub mean: f64,
    pub q3: f64,
    pub max: f64,
}

/// Occurrences of one categorical level
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCount {
    pub level: String,
    pub count: usize,
}

/// Summary of a categorical column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub n_missing: usize,
    /// Level counts in sorted level order
    pub levels: Vec<LevelCount>,
    /// Most frequent level; the first level in sort order wins ties
    pub mode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Summarize every column of the dataset, keyed by column name in column order
pub fn summarize(df: &DataFrame) -> IndexMap<String, ColumnSummary> {
    df.columns()
        .map(|(name, series)| (name.to_string(), summarize_series(series)))
        .collect()
}

fn summarize_series(series: &Series) -> ColumnSummary {
    match series.describe() {
        Ok(stats) => ColumnSummary::Numeric(NumericSummary {
            count: stats.count,
            n_missing: stats.n_missing,
            min: stats.min,
            q1: stats.q25,
            median: stats.q50,
            mean: stats.mean,
            q3: stats.q75,
            max: stats.max,
        }),
        Err(_) => {
            let levels: Vec<LevelCount> = series
                .value_counts()
                .unwrap_or_default()
                .into_iter()
                .map(|(level, count)| LevelCount { level, count })
                .collect();

            // max_by_key keeps the last maximum, so walk the levels in reverse
            let mode = levels
                .iter()
                .rev()
                .filter(|l| l.count > 0)
                .max_by_key(|l| l.count)
                .map(|l| l.level.clone());

            let n_missing = series.n_missing();
            ColumnSummary::Categorical(CategoricalSummary {
                count: series.len() - n_missing,
                n_missing,
                levels,
                mode,
            })
        }
    }
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnSummary::Numeric(s) => {
                write!(
                    f,
                    "Min. {:.3}  1st Qu. {:.3}  Median {:.3}  Mean {:.3}  3rd Qu. {:.3}  Max. {:.3}",
                    s.min, s.q1, s.median, s.mean, s.q3, s.max
                )?;
                if s.n_missing > 0 {
                    write!(f, "  NA's {}", s.n_missing)?;
                }
                Ok(())
            }
            ColumnSummary::Categorical(s) => {
                let counts: Vec<String> = s
                    .levels
                    .iter()
                    .map(|l| format!("{}: {}", l.level, l.count))
                    .collect();
                write!(f, "{}", counts.join("  "))?;
                if let Some(mode) = &s.mode {
                    write!(f, "  (most frequent: {})", mode)?;
                }
                if s.n_missing > 0 {
                    write!(f, "  NA's {}", s.n_missing)?;
                }
                Ok(())
            }
        }
    }
}
