//! Bundled example datasets

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::*;

const MTCARS: &[u8] = include_bytes!("../../data/mtcars.csv");
const FAITHFUL: &[u8] = include_bytes!("../../data/faithful.csv");

/// Datasets that ship with the crate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinDataset {
    /// Motor Trend road tests: 32 cars, 11 numeric attributes
    Mtcars,
    /// Old Faithful geyser: 272 eruptions with their waiting times
    Faithful,
}

impl BuiltinDataset {
    pub const ALL: [BuiltinDataset; 2] = [BuiltinDataset::Mtcars, BuiltinDataset::Faithful];

    pub fn name(&self) -> &'static str {
        match self {
            BuiltinDataset::Mtcars => "mtcars",
            BuiltinDataset::Faithful => "faithful",
        }
    }

    /// Parse the bundled table
    pub fn load(&self) -> Result<DataFrame> {
        let bytes = match self {
            BuiltinDataset::Mtcars => MTCARS,
            BuiltinDataset::Faithful => FAITHFUL,
        };
        read_csv(bytes, &CsvOptions::default())
    }
}

impl FromStr for BuiltinDataset {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self> {
        BuiltinDataset::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| DataError::UnknownDataset(s.to_string()))
    }
}

impl fmt::Display for BuiltinDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
