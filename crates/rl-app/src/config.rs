//! Settings file for the `reglens` binary
//!
//! Every section is optional; missing keys fall back to the library defaults.
//!
//! ```toml
//! [regression]
//! confidence_level = 0.99
//!
//! [narrative]
//! strong_r_squared = 0.8
//!
//! [csv]
//! delimiter = 59  # ';'
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use rl_core::data::CsvOptions;
use rl_models::{NarrativeThresholds, RegressionConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub regression: RegressionConfig,
    pub narrative: NarrativeThresholds,
    pub csv: CsvOptions,
}

impl AppConfig {
    /// Parse and validate TOML settings
    pub fn from_toml(text: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(text).context("invalid settings file")?;
        config.regression.validate()?;
        config.narrative.validate()?;
        Ok(config)
    }

    /// Read settings from `path`, or the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading settings from {}", path.display()))?;
                Self::from_toml(&text)
                    .with_context(|| format!("loading settings from {}", path.display()))
            }
            None => Ok(Self::default()),
        }
    }
}
