//! Descriptive statistics over a whole dataset
//!
//! Per-column summaries (five numbers plus mean for numeric columns,
//! frequency tables for categorical ones) and the pairwise correlation matrix
//! shown next to the regression results.

mod correlation;
mod describe;


pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
pub use describe::{summarize, CategoricalSummary, ColumnSummary, LevelCount, NumericSummary};
