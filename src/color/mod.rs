//! Color representations, conversions and distances
//!
//! This module holds the value types every other component works with,
//! the exact conversions between them, and the perceptual distance metrics.

pub mod model;
pub mod conversion;
pub mod distance;

pub use model::{Hsl, Lab, Rgb};
pub use conversion::{hex_to_rgb, hsl_to_rgb, rgb_to_hex, rgb_to_hsl, rgb_to_lab};
pub use distance::{
    delta_e2000, delta_e76, delta_e94, distance_report, euclidean, similarity_percentage,
    DistanceMetric, DistanceReport,
};
