//! Configuration structures for the colorlens engine.
//!
//! This module defines all tunable parameters for color analysis,
//! organized into logical groups for extraction, classification, and distance.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use colorlens::EngineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = EngineConfig::from_json_file(Path::new("colorlens.json"))?;
//!
//! // Or use defaults
//! let config = EngineConfig::default();
//! # Ok::<(), colorlens::ColorError>(())
//! ```
//!
//! # Configuration Sections
//!
//! - [`ExtractionConfig`]: k-means parameters and image downsampling
//! - [`ClassificationConfig`]: Named color table and description thresholds
//! - [`DistanceConfig`]: Default metric for color comparison

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::DistanceMetric;
use crate::constants::{clustering, description};
use crate::{ColorError, Result};

/// Complete engine configuration.
///
/// Missing sections or fields in a JSON file fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Dominant color extraction configuration
    pub extraction: ExtractionConfig,

    /// Named color classification configuration
    pub classification: ClassificationConfig,

    /// Color comparison configuration
    pub distance: DistanceConfig,
}

/// Dominant color extraction parameters.
///
/// The same seed and pixels always yield the same palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Number of palette colors (k)
    pub cluster_count: usize,

    /// Seed for centroid initialization
    pub seed: u64,

    /// Lloyd iteration cap
    pub max_iterations: usize,

    /// Stop once no centroid moves farther than this (RGB units)
    pub convergence_epsilon: f64,

    /// Parallelize the assignment step on large inputs
    pub parallel: bool,

    /// Images larger than this on either side are downsampled before
    /// clustering; `None` keeps full resolution
    pub max_dimension: Option<u32>,
}

/// Classification parameters.
///
/// Brightness thresholds apply to luma in [0, 1], saturation thresholds
/// to HSV saturation in [0, 1].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// JSON named color table replacing the built-in one
    pub named_colors_path: Option<PathBuf>,

    /// Below this luma a color is "dark"
    pub dark_threshold: f64,

    /// Above this luma a color is "bright"
    pub bright_threshold: f64,

    /// Below this saturation a color is "grayish"
    pub grayish_threshold: f64,

    /// Above this saturation a color is "vivid"
    pub vivid_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceConfig {
    /// Metric used for similarity when none is given
    pub default_metric: DistanceMetric,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            cluster_count: clustering::DEFAULT_CLUSTER_COUNT,
            seed: clustering::DEFAULT_SEED,
            max_iterations: clustering::MAX_ITERATIONS,
            convergence_epsilon: clustering::CONVERGENCE_EPSILON,
            parallel: true,
            max_dimension: Some(clustering::DEFAULT_MAX_DIMENSION),
        }
    }
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            named_colors_path: None,
            dark_threshold: description::DARK_THRESHOLD,
            bright_threshold: description::BRIGHT_THRESHOLD,
            grayish_threshold: description::GRAYISH_THRESHOLD,
            vivid_threshold: description::VIVID_THRESHOLD,
        }
    }
}

impl Default for DistanceConfig {
    fn default() -> Self {
        Self {
            default_metric: DistanceMetric::Euclidean,
        }
    }
}

fn invalid(parameter: &str, value: impl ToString) -> ColorError {
    ColorError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
    }
}

impl EngineConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColorError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            ColorError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ColorError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            ColorError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidParameter` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;
        if extraction.cluster_count == 0 {
            return Err(invalid("extraction.cluster_count", extraction.cluster_count));
        }
        if extraction.max_iterations == 0 {
            return Err(invalid("extraction.max_iterations", extraction.max_iterations));
        }
        if !extraction.convergence_epsilon.is_finite() || extraction.convergence_epsilon < 0.0 {
            return Err(invalid(
                "extraction.convergence_epsilon",
                extraction.convergence_epsilon,
            ));
        }
        if extraction.max_dimension == Some(0) {
            return Err(invalid("extraction.max_dimension", 0));
        }

        let classification = &self.classification;
        let unit_range = [
            ("classification.dark_threshold", classification.dark_threshold),
            ("classification.bright_threshold", classification.bright_threshold),
            ("classification.grayish_threshold", classification.grayish_threshold),
            ("classification.vivid_threshold", classification.vivid_threshold),
        ];
        for (parameter, value) in unit_range {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(parameter, value));
            }
        }
        if classification.dark_threshold > classification.bright_threshold {
            return Err(invalid(
                "classification.dark_threshold",
                format!("{} > bright_threshold", classification.dark_threshold),
            ));
        }
        if classification.grayish_threshold > classification.vivid_threshold {
            return Err(invalid(
                "classification.grayish_threshold",
                format!("{} > vivid_threshold", classification.grayish_threshold),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.extraction.cluster_count, 5);
        assert_eq!(config.extraction.seed, 42);
        assert_eq!(config.extraction.max_iterations, 100);
        assert_eq!(config.extraction.max_dimension, Some(200));
        assert_eq!(config.classification.dark_threshold, 0.4);
        assert_eq!(config.distance.default_metric, DistanceMetric::Euclidean);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"extraction": {"cluster_count": 8}, "distance": {"default_metric": "deltaE2000"}}"#)
                .unwrap();
        assert_eq!(config.extraction.cluster_count, 8);
        assert_eq!(config.extraction.seed, 42);
        assert_eq!(config.distance.default_metric, DistanceMetric::DeltaE2000);
        assert_eq!(config.classification, ClassificationConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.extraction.cluster_count = 0;
        assert!(matches!(
            config.validate(),
            Err(ColorError::InvalidParameter { ref parameter, .. }) if parameter == "extraction.cluster_count"
        ));

        let mut config = EngineConfig::default();
        config.classification.vivid_threshold = 1.5;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.classification.dark_threshold = 0.9;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.extraction.convergence_epsilon = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_file_roundtrip() {
        let path = std::env::temp_dir().join("colorlens_test_config.json");
        let mut config = EngineConfig::default();
        config.extraction.seed = 7;
        config.extraction.max_dimension = None;

        config.to_json_file(&path).unwrap();
        let loaded = EngineConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_from_json_file_errors() {
        let missing = EngineConfig::from_json_file(Path::new("/nonexistent/colorlens.json"));
        assert!(matches!(missing, Err(ColorError::ConfigError { .. })));

        let path = std::env::temp_dir().join("colorlens_test_bad_config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            EngineConfig::from_json_file(&path),
            Err(ColorError::ConfigError { .. })
        ));
        std::fs::remove_file(&path).ok();
    }
}
