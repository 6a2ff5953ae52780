//! TOML configuration for a countdown and its progress ring.
//!
//! ```toml
//! duration_seconds = 150
//!
//! [thresholds]
//! warning_threshold = 0.5
//! critical_threshold = 0.2
//!
//! [style]
//! stroke_width = 6.0
//! enable_warning_colors = true
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use super::engine::CountdownEngine;
use crate::models::countdown::{CountdownError, ProgressStyle, ThresholdConfig};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CountdownConfig {
    pub duration_seconds: i64,
    pub thresholds: ThresholdConfig,
    pub style: ProgressStyle,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            duration_seconds: 60,
            thresholds: ThresholdConfig::default(),
            style: ProgressStyle::default(),
        }
    }
}

impl CountdownConfig {
    /// Parse and validate. The ring's colour bands always follow the
    /// countdown's thresholds, so `[thresholds]` replaces
    /// `style.thresholds`.
    pub fn from_toml_str(data: &str) -> Result<Self> {
        let mut config: CountdownConfig =
            toml::from_str(data).context("failed to parse countdown config")?;
        config.style.thresholds = config.thresholds;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CountdownError> {
        self.duration()?;
        self.thresholds.validate()
    }

    /// The configured total, rejected when it is not positive or does not
    /// fit in a `Duration`.
    pub fn duration(&self) -> Result<Duration, CountdownError> {
        if self.duration_seconds <= 0 {
            return Err(CountdownError::NonPositiveDuration {
                seconds: self.duration_seconds,
            });
        }
        Duration::try_seconds(self.duration_seconds).ok_or(CountdownError::DurationOutOfRange {
            seconds: self.duration_seconds,
        })
    }

    pub fn build_engine(&self) -> Result<CountdownEngine, CountdownError> {
        CountdownEngine::with_thresholds(self.duration()?, self.thresholds)
    }
}

pub fn load_config(path: &Path) -> Result<CountdownConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read countdown config from {}", path.display()))?;
    let config = CountdownConfig::from_toml_str(&data)
        .with_context(|| format!("invalid countdown config in {}", path.display()))?;
    log::debug!(
        "loaded countdown config from {}: {}s",
        path.display(),
        config.duration_seconds
    );
    Ok(config)
}
