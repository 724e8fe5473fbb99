//! Tuning knobs for the price recommendation engine.
//!
//! Loaded from a JSON or YAML file chosen by extension. Every key is
//! optional: missing keys take the defaults below and unknown keys are
//! ignored, so config files written for older versions keep loading.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Markup percentage applied to the median comparable price.
    pub default_markup: f64,
    /// Sample limit used when the caller does not supply one.
    pub max_results: usize,
    /// Smallest sold sample that still yields a statistical recommendation.
    pub min_results: usize,
    /// Sold-listing lookback window in days.
    pub days_back: u32,
    /// Phrases that disqualify a comparable when found in its title.
    pub exclude_words: Vec<String>,
    /// Fractional distance from the median beyond which a record is flagged.
    pub outlier_threshold: f64,
    /// Sample size at which the count half of the confidence score saturates.
    pub confidence_min_items: usize,
    /// Directory for research exports written without an explicit path.
    pub export_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_markup: 15.0,
            max_results: 10,
            min_results: 3,
            days_back: 90,
            exclude_words: ["broken", "for parts", "not working", "damaged"]
                .into_iter()
                .map(str::to_owned)
                .collect(),
            outlier_threshold: 0.3,
            confidence_min_items: 5,
            export_dir: PathBuf::from("."),
        }
    }
}

impl EngineConfig {
    /// Checks the invariants the engine relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_markup.is_finite() || self.default_markup < 0.0 {
            return Err(ConfigError::Validation(format!(
                "default_markup must be a non-negative number, got {}",
                self.default_markup
            )));
        }
        if self.min_results == 0 {
            return Err(ConfigError::Validation(
                "min_results must be at least 1".to_string(),
            ));
        }
        if self.max_results == 0 {
            return Err(ConfigError::Validation(
                "max_results must be at least 1".to_string(),
            ));
        }
        if !self.outlier_threshold.is_finite() || self.outlier_threshold < 0.0 {
            return Err(ConfigError::Validation(format!(
                "outlier_threshold must be a non-negative number, got {}",
                self.outlier_threshold
            )));
        }
        if self.confidence_min_items == 0 {
            return Err(ConfigError::Validation(
                "confidence_min_items must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load the engine configuration, or the defaults when `path` is `None`.
///
/// Files ending in `.yaml`/`.yml` are parsed as YAML, everything else as JSON.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig, ConfigError> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::EngineConfigIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config = parse_engine_config(&content, is_yaml(path)).map_err(|reason| {
        ConfigError::EngineConfigParse {
            path: path.display().to_string(),
            reason,
        }
    })?;

    config.validate()?;
    Ok(config)
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

fn parse_engine_config(content: &str, yaml: bool) -> Result<EngineConfig, String> {
    if yaml {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }
}
