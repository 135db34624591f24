//! Harmonious color schemes
//!
//! Complementary colors invert each channel. Analogous and triadic colors
//! rotate the hue in HSL space and convert back, so they sit on the color
//! wheel relative to the input.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::constants::{description::CONTRAST_THRESHOLD, scheme};

/// A color and the colors that harmonize with it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    pub original: Rgb,
    pub complementary: Rgb,
    /// Hue -30 and +30
    pub analogous: [Rgb; 2],
    /// Hue +120 and +240
    pub triadic: [Rgb; 2],
}

impl ColorScheme {
    pub fn new(color: Rgb) -> Self {
        let (left, right) = analogous(color);
        let (second, third) = triadic(color);
        Self {
            original: color,
            complementary: complementary(color),
            analogous: [left, right],
            triadic: [second, third],
        }
    }

    pub fn colors(&self, kind: SchemeType) -> Vec<Rgb> {
        match kind {
            SchemeType::Complementary => vec![self.complementary],
            SchemeType::Analogous => self.analogous.to_vec(),
            SchemeType::Triadic => self.triadic.to_vec(),
        }
    }
}

/// Which related colors to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemeType {
    #[default]
    Complementary,
    Analogous,
    Triadic,
}

impl fmt::Display for SchemeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SchemeType::Complementary => "complementary",
            SchemeType::Analogous => "analogous",
            SchemeType::Triadic => "triadic",
        })
    }
}

/// Case-insensitive; anything unrecognized means complementary
impl FromStr for SchemeType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "analogous" => SchemeType::Analogous,
            "triadic" => SchemeType::Triadic,
            _ => SchemeType::Complementary,
        })
    }
}

/// Channel-wise inversion
pub fn complementary(color: Rgb) -> Rgb {
    Rgb::new(255 - color.r, 255 - color.g, 255 - color.b)
}

/// Hue rotated by -30 and +30 degrees
pub fn analogous(color: Rgb) -> (Rgb, Rgb) {
    let hsl = color.to_hsl();
    (
        hsl.rotate(-scheme::ANALOGOUS_OFFSET).to_rgb(),
        hsl.rotate(scheme::ANALOGOUS_OFFSET).to_rgb(),
    )
}

/// Hue rotated by +120 and +240 degrees
pub fn triadic(color: Rgb) -> (Rgb, Rgb) {
    let hsl = color.to_hsl();
    (
        hsl.rotate(scheme::TRIADIC_OFFSET).to_rgb(),
        hsl.rotate(2 * scheme::TRIADIC_OFFSET).to_rgb(),
    )
}

pub fn scheme_colors(color: Rgb, kind: SchemeType) -> Vec<Rgb> {
    match kind {
        SchemeType::Complementary => vec![complementary(color)],
        SchemeType::Analogous => {
            let (a, b) = analogous(color);
            vec![a, b]
        }
        SchemeType::Triadic => {
            let (a, b) = triadic(color);
            vec![a, b]
        }
    }
}

/// Black or white, whichever reads better on top of `background`
///
/// Uses YIQ brightness `(299R + 587G + 114B) / 1000`.
pub fn contrast_color(background: Rgb) -> Rgb {
    let yiq = (299.0 * background.r as f64 + 587.0 * background.g as f64 + 114.0 * background.b as f64)
        / 1000.0;
    if yiq > CONTRAST_THRESHOLD {
        Rgb::BLACK
    } else {
        Rgb::WHITE
    }
}
