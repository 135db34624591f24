//! Color space conversion utilities
//!
//! Provides conversions between color representations:
//! - Hex string to/from 8-bit RGB
//! - RGB to/from integer HSL
//! - RGB to CIE Lab (D65) through gamma decoding and XYZ
//!
//! The RGB to HSL and RGB to Lab transforms use the exact constants from
//! [`crate::constants`] so that distances are reproducible across platforms.

use palette::{encoding, FromColor, Hsl as PaletteHsl, Srgb};

use crate::color::{Hsl, Lab, Rgb};
use crate::constants::{lab, srgb, D65_WHITE_POINT_XYZ};
use crate::{ColorError, Result};

/// Parse hexadecimal color string to RGB
///
/// # Arguments
///
/// * `hex` - Hex color string (e.g., "#FF0000" or "ff0000"), case-insensitive
///
/// # Errors
///
/// Returns `ColorError::InvalidColorFormat` unless the string is exactly six
/// hex digits after stripping one optional `#`
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);

    if digits.len() != 6 {
        return Err(ColorError::invalid_hex(
            hex,
            format!("expected 6 hex digits, got {}", digits.len()),
        ));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::invalid_hex(hex, "contains non-hex characters"));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16)
            .map_err(|e| ColorError::invalid_hex(hex, e.to_string()))
    };

    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Convert RGB to lowercase hexadecimal color string (e.g., "#ff0000")
pub fn rgb_to_hex(color: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

/// Convert RGB to integer HSL
///
/// Hue is rounded to whole degrees and wrapped into [0, 360); saturation and
/// lightness are rounded to whole percentages.
pub fn rgb_to_hsl(color: Rgb) -> Hsl {
    let r = color.r as f64 / 255.0;
    let g = color.g as f64 / 255.0;
    let b = color.b as f64 / 255.0;

    let max_channel = color.r.max(color.g).max(color.b);
    let min_channel = color.r.min(color.g).min(color.b);
    let max = max_channel as f64 / 255.0;
    let min = min_channel as f64 / 255.0;
    let delta = max - min;

    let lightness = (max + min) / 2.0;

    let (hue, saturation) = if max_channel == min_channel {
        (0.0, 0.0)
    } else {
        let sector = if max_channel == color.r {
            ((g - b) / delta).rem_euclid(6.0)
        } else if max_channel == color.g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (sector * 60.0, delta / (1.0 - (2.0 * lightness - 1.0).abs()))
    };

    Hsl::new(
        hue.round() as i32,
        (saturation * 100.0).round().clamp(0.0, 100.0) as u8,
        (lightness * 100.0).round().clamp(0.0, 100.0) as u8,
    )
}

/// Convert integer HSL back to RGB
///
/// Delegates the sector math to `palette`; channels are rounded and clamped
/// to [0, 255].
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let color = PaletteHsl::<encoding::Srgb, f64>::new(
        hsl.h as f64,
        hsl.s as f64 / 100.0,
        hsl.l as f64 / 100.0,
    );
    let srgb: Srgb<u8> = Srgb::<f64>::from_color(color).into_format();
    Rgb::from(srgb)
}

/// Convert RGB (0-255) to Lab color space
///
/// # Arguments
///
/// * `color` - 8-bit sRGB color
///
/// # Returns
///
/// Lab color under the D65 reference white, with L* clamped to be non-negative
pub fn rgb_to_lab(color: Rgb) -> Lab {
    let linear = [
        decode_gamma(color.r as f64 / 255.0),
        decode_gamma(color.g as f64 / 255.0),
        decode_gamma(color.b as f64 / 255.0),
    ];

    let mut xyz = [0.0; 3];
    for (out, row) in xyz.iter_mut().zip(srgb::TO_XYZ.iter()) {
        *out = row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2];
    }

    let fx = lab_f(xyz[0] / D65_WHITE_POINT_XYZ[0]);
    let fy = lab_f(xyz[1] / D65_WHITE_POINT_XYZ[1]);
    let fz = lab_f(xyz[2] / D65_WHITE_POINT_XYZ[2]);

    Lab::new(
        (116.0 * fy - 16.0).max(0.0),
        500.0 * (fx - fy),
        200.0 * (fy - fz),
    )
}

/// sRGB electro-optical transfer function
fn decode_gamma(value: f64) -> f64 {
    if value > srgb::GAMMA_THRESHOLD {
        ((value + 0.055) / 1.055).powf(srgb::GAMMA_EXPONENT)
    } else {
        value / srgb::LINEAR_DIVISOR
    }
}

/// CIE cube-root compression with linear toe
fn lab_f(t: f64) -> f64 {
    if t > lab::EPSILON {
        t.cbrt()
    } else {
        lab::KAPPA_SLOPE * t + lab::LINEAR_OFFSET
    }
}
