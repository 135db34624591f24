//! Reference values and tuning constants for color analysis
//!
//! Colorimetric constants follow IEC 61966-2-1 (sRGB) and CIE 15:2004.
//! They are rounded exactly as listed here; distance results depend on them.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. This is the standard reference for digital
/// images and computer displays.
pub mod d65 {
    /// D65 white point in CIE XYZ color space (Xn, Yn, Zn)
    pub const WHITE_POINT_XYZ: [f64; 3] = [0.95047, 1.00000, 1.08883];
}

/// Re-export D65 white point at top level for convenience
pub const D65_WHITE_POINT_XYZ: [f64; 3] = d65::WHITE_POINT_XYZ;

/// sRGB transfer function and primaries
pub mod srgb {
    /// Linear-light threshold of the sRGB decoding curve
    pub const GAMMA_THRESHOLD: f64 = 0.04045;

    /// Linear segment slope divisor
    pub const LINEAR_DIVISOR: f64 = 12.92;

    /// Exponent of the power segment
    pub const GAMMA_EXPONENT: f64 = 2.4;

    /// Linear sRGB to XYZ (D65), row-major
    pub const TO_XYZ: [[f64; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];
}

/// CIE L*a*b* transform
pub mod lab {
    /// Below this ratio the cube root is replaced by a linear segment
    pub const EPSILON: f64 = 0.008856;

    /// Slope of the linear segment
    pub const KAPPA_SLOPE: f64 = 7.787;

    /// Offset of the linear segment (16/116)
    pub const LINEAR_OFFSET: f64 = 16.0 / 116.0;
}

/// Delta E constants
pub mod delta_e {
    /// CIE94 lightness weight (graphic arts)
    pub const CIE94_KL: f64 = 1.0;

    /// CIE94 chroma weighting coefficient
    pub const CIE94_K1: f64 = 0.045;

    /// CIE94 hue weighting coefficient
    pub const CIE94_K2: f64 = 0.015;

    /// 25^7, used by the CIEDE2000 chroma compensation terms
    pub const POW25_7: f64 = 6_103_515_625.0;
}

/// Normalization ceilings for similarity and confidence
pub mod normalization {
    /// Largest possible RGB Euclidean distance, sqrt(3 * 255^2)
    pub const MAX_EUCLIDEAN_DISTANCE: f64 = 441.672_955_930_063_7;

    /// Practical ceiling for Delta E variants
    pub const MAX_DELTA_E: f64 = 100.0;

    /// Distance ceiling used for classification confidence
    pub const CLASSIFIER_MAX_DISTANCE: f64 = 441.7;
}

/// Dominant color extraction defaults
pub mod clustering {
    /// Default number of dominant colors
    pub const DEFAULT_CLUSTER_COUNT: usize = 5;

    /// Default clustering seed
    pub const DEFAULT_SEED: u64 = 42;

    /// Iteration cap for Lloyd's algorithm
    pub const MAX_ITERATIONS: usize = 100;

    /// Largest centroid movement (RGB units) still considered converged
    pub const CONVERGENCE_EPSILON: f64 = 1e-3;

    /// Below this pixel count the assignment step stays on the calling thread
    pub const PARALLEL_MIN_PIXELS: usize = 4096;

    /// Default longest image side before clustering
    pub const DEFAULT_MAX_DIMENSION: u32 = 200;
}

/// Qualitative description thresholds
pub mod description {
    /// Luma brightness below this is "dark"
    pub const DARK_THRESHOLD: f64 = 0.4;

    /// Luma brightness above this is "bright"
    pub const BRIGHT_THRESHOLD: f64 = 0.7;

    /// HSV saturation below this is "grayish"
    pub const GRAYISH_THRESHOLD: f64 = 0.3;

    /// HSV saturation above this is "vivid"
    pub const VIVID_THRESHOLD: f64 = 0.8;

    /// YIQ brightness above which dark text is used for contrast
    pub const CONTRAST_THRESHOLD: f64 = 128.0;
}

/// Scheme hue offsets in degrees
pub mod scheme {
    pub const ANALOGOUS_OFFSET: i32 = 30;
    pub const TRIADIC_OFFSET: i32 = 120;
}
