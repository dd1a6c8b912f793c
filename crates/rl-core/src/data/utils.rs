//! Utility types and functions for data operations

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::FloatArray;

/// Column type information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Numeric,
    Categorical,
}

impl ColumnType {
    /// Check if type is numeric
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Numeric)
    }

    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Categorical => "categorical",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Make column names unique the way R's `make.unique` does.
///
/// Later duplicates get `.1`, `.2`, ... appended; a generated name never
/// collides with a name that already exists in the input.
pub fn make_unique<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut seen: HashSet<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
    let mut used: HashSet<String> = HashSet::with_capacity(names.len());
    let mut out = Vec::with_capacity(names.len());

    for name in names {
        let name = name.as_ref();
        if used.insert(name.to_string()) {
            out.push(name.to_string());
            continue;
        }

        let mut suffix = 1;
        let candidate = loop {
            let candidate = format!("{}.{}", name, suffix);
            if !seen.contains(&candidate) {
                break candidate;
            }
            suffix += 1;
        };
        seen.insert(candidate.clone());
        used.insert(candidate.clone());
        out.push(candidate);
    }

    out
}

/// Rows where both columns are present.
///
/// Returns the original row indices together with the paired values.
pub fn pairwise_complete(a: &FloatArray, b: &FloatArray) -> (Vec<usize>, Vec<f64>, Vec<f64>) {
    let mut rows = Vec::new();
    let mut xs = Vec::new();
    let mut ys = Vec::new();

    for (i, (&x, &y)) in a.iter().zip(b.iter()).enumerate() {
        if !x.is_nan() && !y.is_nan() {
            rows.push(i);
            xs.push(x);
            ys.push(y);
        }
    }

    (rows, xs, ys)
}
