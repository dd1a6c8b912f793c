//! Correlation matrix over the numeric columns

use std::fmt;

use serde::Serialize;

use crate::data::{pairwise_complete, DataError, DataFrame, FloatArray, Matrix, Result};

/// Symmetric Pearson correlation matrix, rows and columns in `names` order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Matrix,
}

impl CorrelationMatrix {
    /// Correlation between two named columns
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == a)?;
        let j = self.names.iter().position(|n| n == b)?;
        Some(self.values[(i, j)])
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Pearson correlation using the rows where both columns are present.
///
/// `NaN` when fewer than two rows are complete or either side has no spread.
pub fn pearson(a: &FloatArray, b: &FloatArray) -> f64 {
    let (_, xs, ys) = pairwise_complete(a, b);
    let n = xs.len();
    if n < 2 {
        return f64::NAN;
    }

    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = ys.iter().sum::<f64>() / n as f64;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (&x, &y) in xs.iter().zip(&ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx <= 0.0 || syy <= 0.0 {
        return f64::NAN;
    }

    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}

/// Correlation matrix over the numeric columns, pairwise-complete observations
pub fn correlation_matrix(df: &DataFrame) -> Result<CorrelationMatrix> {
    let names: Vec<String> = df.numeric_column_names().into_iter().map(String::from).collect();
    if names.len() < 2 {
        return Err(DataError::InsufficientData {
            what: "numeric columns",
            required: 2,
            available: names.len(),
        });
    }

    let columns: Vec<&FloatArray> = names
        .iter()
        .map(|n| df.column_values(n))
        .collect::<Result<_>>()?;

    let k = names.len();
    let mut values = Matrix::zeros((k, k));
    for i in 0..k {
        for j in i..k {
            let r = pearson(columns[i], columns[j]);
            values[(i, j)] = r;
            values[(j, i)] = r;
        }
    }

    Ok(CorrelationMatrix { names, values })
}

impl fmt::Display for CorrelationMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.names.iter().map(|n| n.len()).max().unwrap_or(0).max(6);

        write!(f, "{:<width$}", "", width = width)?;
        for name in &self.names {
            write!(f, " {:>width$}", name, width = width)?;
        }
        writeln!(f)?;

        for (i, name) in self.names.iter().enumerate() {
            write!(f, "{:<width$}", name, width = width)?;
            for j in 0..self.names.len() {
                write!(f, " {:>width$.3}", self.values[(i, j)], width = width)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
