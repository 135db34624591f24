//! Color value types
//!
//! [`Rgb`] is the canonical representation; [`Hsl`] and [`Lab`] are derived
//! from it through [`crate::color::conversion`].

use std::fmt;
use std::str::FromStr;

use palette::white_point::D65;
use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::color::conversion;
use crate::{ColorError, Result};

/// CIE L*a*b* coordinates relative to D65
pub type Lab = palette::Lab<D65, f64>;

/// 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a 6-digit hex string, with or without a leading `#`
    pub fn from_hex(hex: &str) -> Result<Self> {
        conversion::hex_to_rgb(hex)
    }

    /// Build a color from wide integer channels, rejecting anything outside [0, 255]
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidChannelRange` naming the first offending channel
    pub fn from_channels(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self {
            r: strict_channel("red", r)?,
            g: strict_channel("green", g)?,
            b: strict_channel("blue", b)?,
        })
    }

    /// Build a color from wide integer channels, saturating each to [0, 255]
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        Self {
            r: r.clamp(0, 255) as u8,
            g: g.clamp(0, 255) as u8,
            b: b.clamp(0, 255) as u8,
        }
    }

    pub fn to_hex(self) -> String {
        conversion::rgb_to_hex(self)
    }

    pub fn to_hsl(self) -> Hsl {
        conversion::rgb_to_hsl(self)
    }

    pub fn to_lab(self) -> Lab {
        conversion::rgb_to_lab(self)
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Squared RGB distance, exact in integer arithmetic
    pub(crate) fn distance_squared(self, other: Rgb) -> u32 {
        let dr = self.r as i32 - other.r as i32;
        let dg = self.g as i32 - other.g as i32;
        let db = self.b as i32 - other.b as i32;
        (dr * dr + dg * dg + db * db) as u32
    }
}

fn strict_channel(channel: &'static str, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| ColorError::InvalidChannelRange { channel, value })
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        conversion::hex_to_rgb(s)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Rgb> for [u8; 3] {
    fn from(color: Rgb) -> Self {
        color.channels()
    }
}

impl From<Srgb<u8>> for Rgb {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl From<Rgb> for Srgb<u8> {
    fn from(color: Rgb) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

impl From<image::Rgb<u8>> for Rgb {
    fn from(pixel: image::Rgb<u8>) -> Self {
        Self::from(pixel.0)
    }
}

/// Hue/Saturation/Lightness with integer degrees and percentages
///
/// Hue is always in [0, 360); saturation and lightness in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Hsl {
    /// Create an HSL value, wrapping hue modulo 360 and clamping s/l to 100
    pub fn new(h: i32, s: u8, l: u8) -> Self {
        Self {
            h: h.rem_euclid(360) as u16,
            s: s.min(100),
            l: l.min(100),
        }
    }

    /// Rotate the hue by `degrees` (may be negative)
    pub fn rotate(self, degrees: i32) -> Self {
        Self::new(self.h as i32 + degrees, self.s, self.l)
    }

    pub fn to_rgb(self) -> Rgb {
        conversion::hsl_to_rgb(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_channels_strict() {
        assert_eq!(Rgb::from_channels(1, 2, 3).unwrap(), Rgb::new(1, 2, 3));

        match Rgb::from_channels(0, 256, 0) {
            Err(ColorError::InvalidChannelRange { channel, value }) => {
                assert_eq!(channel, "green");
                assert_eq!(value, 256);
            }
            other => panic!("Expected InvalidChannelRange, got {:?}", other),
        }

        assert!(Rgb::from_channels(-1, 0, 0).is_err());
    }

    #[test]
    fn test_clamped() {
        assert_eq!(Rgb::clamped(-20, 128, 300), Rgb::new(0, 128, 255));
    }

    #[test]
    fn test_display_and_parse() {
        let color = Rgb::new(255, 136, 0);
        assert_eq!(color.to_string(), "#ff8800");
        assert_eq!("#FF8800".parse::<Rgb>().unwrap(), color);
    }

    #[test]
    fn test_srgb_interop() {
        let color = Rgb::new(10, 20, 30);
        let srgb: Srgb<u8> = color.into();
        assert_eq!(Rgb::from(srgb), color);
    }

    #[test]
    fn test_hsl_wraps_hue() {
        assert_eq!(Hsl::new(370, 50, 50).h, 10);
        assert_eq!(Hsl::new(-30, 50, 50).h, 330);
        assert_eq!(Hsl::new(360, 50, 50).h, 0);
    }

    #[test]
    fn test_hsl_rotate() {
        let hsl = Hsl::new(350, 100, 50);
        assert_eq!(hsl.rotate(20).h, 10);
        assert_eq!(hsl.rotate(-360).h, 350);
    }

    #[test]
    fn test_serialization() {
        let color = Rgb::new(1, 2, 3);
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, r#"{"r":1,"g":2,"b":3}"#);
        let back: Rgb = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }
}
