//! # colorlens
//!
//! A Rust crate for analyzing colors in images and discrete color values.
//!
//! This library provides:
//! - Exact conversions between hex, RGB, HSL and CIE Lab (D65)
//! - Perceptual distances (Euclidean RGB, CIE76, CIE94, CIEDE2000)
//! - Reproducible dominant color extraction with seeded k-means
//! - Named color classification and harmonious color schemes
//!
//! ## Example
//!
//! ```rust,no_run
//! use colorlens::{ColorEngine, EngineConfig};
//! use std::path::Path;
//!
//! let engine = ColorEngine::new(EngineConfig::default())?;
//! let report = engine.extract_palette_from_image(Path::new("photo.jpg"))?;
//! for entry in &report.palette {
//!     println!("{} {:.1}%", entry.hex, entry.percentage);
//! }
//!
//! let analysis = engine.analyze_color("#3366cc")?;
//! println!("{}", analysis.description.full_description);
//! # Ok::<(), colorlens::ColorError>(())
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

pub mod error;
pub mod constants;
pub mod config;
pub mod color;
pub mod extraction;
pub mod classification;
pub mod scheme;
pub mod image_loader;

pub use error::{ColorError, Result};
pub use config::{ClassificationConfig, DistanceConfig, EngineConfig, ExtractionConfig};
pub use color::{DistanceMetric, DistanceReport, Hsl, Lab, Rgb};
pub use extraction::{DominantColorExtractor, ExtractionReport, PaletteEntry};
pub use classification::{
    Classification, ColorClassifier, ColorDescription, NamedColor, NamedColorTable,
};
pub use scheme::{ColorScheme, SchemeType};
pub use image_loader::PixelBuffer;

/// Everything the engine can say about a single color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorAnalysis {
    pub color: Rgb,
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub hsl: Hsl,
    pub description: ColorDescription,
    pub scheme: ColorScheme,
}

/// Distance report for two colors plus a similarity score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorComparison {
    pub first: Rgb,
    pub second: Rgb,
    pub report: DistanceReport,
    /// Metric the similarity was computed with
    pub metric: DistanceMetric,
    /// Percentage in [0, 100]
    pub similarity: f64,
}

/// Configured extractor and classifier behind one entry point
#[derive(Debug, Clone)]
pub struct ColorEngine {
    config: EngineConfig,
    extractor: DominantColorExtractor,
    classifier: ColorClassifier,
}

impl ColorEngine {
    /// Build the engine, loading an external named color table if configured
    ///
    /// # Errors
    ///
    /// Returns `ColorError` if:
    /// - The configuration fails validation (`InvalidParameter`)
    /// - The named color table cannot be read or is empty
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let extractor = DominantColorExtractor::from_config(&config.extraction);
        let classifier = ColorClassifier::from_config(&config.classification)?;
        Ok(Self {
            config,
            extractor,
            classifier,
        })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn classifier(&self) -> &ColorClassifier {
        &self.classifier
    }

    /// Extract the configured number of dominant colors
    pub fn extract_palette(&self, pixels: &[Rgb]) -> Result<ExtractionReport> {
        self.extractor
            .extract(pixels, self.config.extraction.cluster_count)
    }

    /// Load, downsample per `max_dimension`, and extract
    pub fn extract_palette_from_image(&self, path: &Path) -> Result<ExtractionReport> {
        let buffer = image_loader::load_pixels(path)?;
        let buffer = match self.config.extraction.max_dimension {
            Some(max_dimension) => buffer.downsample(max_dimension),
            None => buffer,
        };
        self.extract_palette(&buffer.pixels())
    }

    /// Name, describe and derive a scheme for a hex color
    pub fn analyze_color(&self, hex: &str) -> Result<ColorAnalysis> {
        let color = Rgb::from_hex(hex)?;
        Ok(ColorAnalysis {
            color,
            hex: color.to_hex(),
            hsl: color.to_hsl(),
            description: self.classifier.describe(color),
            scheme: ColorScheme::new(color),
        })
    }

    /// All metrics plus similarity under the configured default metric
    pub fn compare_colors(&self, hex1: &str, hex2: &str) -> Result<ColorComparison> {
        let first = Rgb::from_hex(hex1)?;
        let second = Rgb::from_hex(hex2)?;
        let metric = self.config.distance.default_metric;
        Ok(ColorComparison {
            first,
            second,
            report: color::distance_report(first, second),
            metric,
            similarity: metric.similarity(first, second),
        })
    }
}
