//! Engine configuration.
//!
//! # Examples
//!
//! ```
//! use grievance::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! assert_eq!(config.category_max_features, 5000);
//! assert_eq!(config.priority_max_features, 3000);
//! assert!(config.model_dir.is_none());
//!
//! let mut custom = EngineConfig::default();
//! custom.holdout_fraction = 0.25;
//! custom.validate().unwrap();
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GrievanceError, Result};

/// Configuration for a [`ComplaintEngine`](crate::engine::ComplaintEngine).
///
/// Every field has a default, so a JSON file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory for model artifacts; `None` keeps them in memory.
    pub model_dir: Option<PathBuf>,
    /// Vocabulary cap of the category pipeline.
    pub category_max_features: usize,
    /// Vocabulary cap of the priority pipeline.
    pub priority_max_features: usize,
    /// Additive smoothing of the naive Bayes models.
    pub smoothing_alpha: f64,
    /// Share of a retraining batch held out for evaluation, in `(0, 1)`.
    pub holdout_fraction: f64,
    /// Seed of the train/holdout shuffle.
    pub split_seed: u64,
    /// Fit on the built-in seed examples when no usable artifacts exist.
    pub bootstrap_on_start: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            model_dir: None,
            category_max_features: 5000,
            priority_max_features: 3000,
            smoothing_alpha: 1.0,
            holdout_fraction: 0.2,
            split_seed: 42,
            bootstrap_on_start: true,
        }
    }
}

impl EngineConfig {
    /// Read a JSON configuration file and validate it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            GrievanceError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Store artifacts under `dir`.
    pub fn with_model_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.model_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.category_max_features == 0 || self.priority_max_features == 0 {
            return Err(GrievanceError::config(
                "feature caps must be at least 1",
            ));
        }
        if !self.smoothing_alpha.is_finite() || self.smoothing_alpha <= 0.0 {
            return Err(GrievanceError::config(format!(
                "smoothing_alpha must be positive, got {}",
                self.smoothing_alpha
            )));
        }
        if !(self.holdout_fraction > 0.0 && self.holdout_fraction < 1.0) {
            return Err(GrievanceError::config(format!(
                "holdout_fraction must be in (0, 1), got {}",
                self.holdout_fraction
            )));
        }
        Ok(())
    }
}
