//! Dominant color extraction
//!
//! Extracts a ranked palette from a pixel buffer with:
//! - Seeded k-means clustering in RGB space
//! - Explicit reseeding of empty clusters (reported, never dropped)
//! - Per-color coverage percentages that sum to 100
//!
//! Downsampling large images is left to the caller; see
//! [`crate::image_loader::PixelBuffer::downsample`].

mod kmeans;

use serde::{Deserialize, Serialize};

use crate::color::{Hsl, Rgb};
use crate::config::ExtractionConfig;
use crate::constants::clustering;
use crate::{ColorError, Result};

use kmeans::KMeansParams;

/// One ranked color of an extracted palette
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaletteEntry {
    /// Cluster centroid
    pub rgb: Rgb,
    /// Lowercase `#rrggbb`
    pub hex: String,
    pub hsl: Hsl,
    /// Share of the image's pixels, in [0, 100]
    pub percentage: f64,
    /// Number of pixels assigned to this color
    pub pixel_count: usize,
}

impl PaletteEntry {
    fn new(rgb: Rgb, pixel_count: usize, total_pixels: usize) -> Self {
        Self {
            rgb,
            hex: rgb.to_hex(),
            hsl: rgb.to_hsl(),
            percentage: pixel_count as f64 * 100.0 / total_pixels as f64,
            pixel_count,
        }
    }
}

/// Extraction result with clustering statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionReport {
    /// Entries sorted by percentage descending, ties by cluster index
    pub palette: Vec<PaletteEntry>,
    /// Number of pixels clustered
    pub total_pixels: usize,
    /// Lloyd iterations performed
    pub iterations: usize,
    /// Whether centroid movement fell below the epsilon before the cap
    pub converged: bool,
    /// Total empty-cluster reseeds across all iterations
    pub reseeded_clusters: usize,
    /// Clusters with no pixels in the final assignment (0% entries)
    pub empty_clusters: usize,
}

impl ExtractionReport {
    /// The most common color
    pub fn dominant(&self) -> Option<&PaletteEntry> {
        self.palette.first()
    }

    pub fn colors(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.palette.iter().map(|entry| entry.rgb)
    }
}

/// Dominant color extractor implementing seeded k-means
#[derive(Debug, Clone)]
pub struct DominantColorExtractor {
    seed: u64,
    max_iterations: usize,
    convergence_epsilon: f64,
    parallel: bool,
}

impl Default for DominantColorExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl DominantColorExtractor {
    /// Create an extractor with default parameters
    pub fn new() -> Self {
        Self {
            seed: clustering::DEFAULT_SEED,
            max_iterations: clustering::MAX_ITERATIONS,
            convergence_epsilon: clustering::CONVERGENCE_EPSILON,
            parallel: true,
        }
    }

    /// Create an extractor with custom parameters
    pub fn with_params(seed: u64, max_iterations: usize, convergence_epsilon: f64) -> Self {
        Self {
            seed,
            max_iterations,
            convergence_epsilon,
            parallel: true,
        }
    }

    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            seed: config.seed,
            max_iterations: config.max_iterations,
            convergence_epsilon: config.convergence_epsilon,
            parallel: config.parallel,
        }
    }

    /// Enable or disable the multi-threaded assignment step (output is identical)
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Extract `k` dominant colors from a pixel sequence
    ///
    /// # Arguments
    ///
    /// * `pixels` - RGB pixels in any order
    /// * `k` - Number of clusters, `1 <= k <= pixels.len()`
    ///
    /// # Returns
    ///
    /// `ExtractionReport` with exactly `k` palette entries
    ///
    /// # Errors
    ///
    /// Returns `ColorError` if:
    /// - `pixels` is empty (`InvalidImageData`)
    /// - `k` is zero or exceeds the pixel count (`InvalidClusterCount`)
    pub fn extract(&self, pixels: &[Rgb], k: usize) -> Result<ExtractionReport> {
        // Step 1: Validate input
        if pixels.is_empty() {
            return Err(ColorError::InvalidImageData {
                reason: "pixel sequence is empty".into(),
            });
        }
        if k == 0 || k > pixels.len() {
            return Err(ColorError::InvalidClusterCount {
                requested: k,
                pixel_count: pixels.len(),
            });
        }

        // Step 2: Cluster
        let clustering = kmeans::cluster(
            pixels,
            k,
            KMeansParams {
                seed: self.seed,
                max_iterations: self.max_iterations,
                epsilon: self.convergence_epsilon,
                parallel: self.parallel,
            },
        );

        // Step 3: Rank clusters by population, then by index
        let mut order: Vec<usize> = (0..k).collect();
        order.sort_by(|&a, &b| {
            clustering.counts[b]
                .cmp(&clustering.counts[a])
                .then(a.cmp(&b))
        });

        let palette: Vec<PaletteEntry> = order
            .into_iter()
            .map(|i| PaletteEntry::new(clustering.centroids[i], clustering.counts[i], pixels.len()))
            .collect();
        let empty_clusters = clustering.counts.iter().filter(|&&c| c == 0).count();

        log::debug!(
            "Extracted {} colors from {} pixels in {} iterations (converged: {}, reseeded: {}, empty: {})",
            k,
            pixels.len(),
            clustering.iterations,
            clustering.converged,
            clustering.reseeded,
            empty_clusters
        );

        Ok(ExtractionReport {
            palette,
            total_pixels: pixels.len(),
            iterations: clustering.iterations,
            converged: clustering.converged,
            reseeded_clusters: clustering.reseeded,
            empty_clusters,
        })
    }
}
