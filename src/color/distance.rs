//! Perceptual color distance metrics
//!
//! Euclidean RGB distance and the Delta E family (CIE76, CIE94, CIEDE2000).
//! Every metric is symmetric and zero for identical inputs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Lab, Rgb};
use crate::constants::{delta_e, normalization};
use crate::{ColorError, Result};

/// Supported distance metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DistanceMetric {
    #[serde(rename = "euclidean")]
    Euclidean,
    #[serde(rename = "deltaE76")]
    DeltaE76,
    #[serde(rename = "deltaE94")]
    DeltaE94,
    #[serde(rename = "deltaE2000")]
    DeltaE2000,
}

impl DistanceMetric {
    pub const ALL: [DistanceMetric; 4] = [
        DistanceMetric::Euclidean,
        DistanceMetric::DeltaE76,
        DistanceMetric::DeltaE94,
        DistanceMetric::DeltaE2000,
    ];

    /// Canonical report key
    pub fn name(self) -> &'static str {
        match self {
            DistanceMetric::Euclidean => "euclidean",
            DistanceMetric::DeltaE76 => "deltaE76",
            DistanceMetric::DeltaE94 => "deltaE94",
            DistanceMetric::DeltaE2000 => "deltaE2000",
        }
    }

    /// Normalization ceiling used by [`similarity_percentage`]
    pub fn max_distance(self) -> f64 {
        match self {
            DistanceMetric::Euclidean => normalization::MAX_EUCLIDEAN_DISTANCE,
            _ => normalization::MAX_DELTA_E,
        }
    }

    pub fn distance(self, c1: Rgb, c2: Rgb) -> f64 {
        match self {
            DistanceMetric::Euclidean => euclidean(c1, c2),
            DistanceMetric::DeltaE76 => delta_e76(c1, c2),
            DistanceMetric::DeltaE94 => delta_e94(c1, c2),
            DistanceMetric::DeltaE2000 => delta_e2000(c1, c2),
        }
    }

    /// Similarity in [0, 100], where 100 means identical
    pub fn similarity(self, c1: Rgb, c2: Rgb) -> f64 {
        let distance = self.distance(c1, c2);
        (100.0 - distance / self.max_distance() * 100.0).clamp(0.0, 100.0)
    }
}

impl fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceMetric {
    type Err = ColorError;

    /// Accepts the canonical names and the long `deltaE_CIE*` aliases
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "euclidean" => Ok(DistanceMetric::Euclidean),
            "deltaE76" | "deltaE_CIE76" => Ok(DistanceMetric::DeltaE76),
            "deltaE94" | "deltaE_CIE94" => Ok(DistanceMetric::DeltaE94),
            "deltaE2000" | "deltaE_CIEDE2000" => Ok(DistanceMetric::DeltaE2000),
            other => Err(ColorError::UnknownMetric {
                name: other.to_string(),
            }),
        }
    }
}

/// Euclidean norm of the RGB channel differences
pub fn euclidean(c1: Rgb, c2: Rgb) -> f64 {
    (c1.distance_squared(c2) as f64).sqrt()
}

/// CIE76 color difference between two RGB colors
pub fn delta_e76(c1: Rgb, c2: Rgb) -> f64 {
    cie76(&c1.to_lab(), &c2.to_lab())
}

/// CIE94 color difference between two RGB colors
pub fn delta_e94(c1: Rgb, c2: Rgb) -> f64 {
    cie94(&c1.to_lab(), &c2.to_lab())
}

/// CIEDE2000 color difference between two RGB colors
pub fn delta_e2000(c1: Rgb, c2: Rgb) -> f64 {
    ciede2000(&c1.to_lab(), &c2.to_lab())
}

/// Euclidean distance in Lab
pub fn cie76(lab1: &Lab, lab2: &Lab) -> f64 {
    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    (dl * dl + da * da + db * db).sqrt()
}

/// CIE94 color difference (graphic arts weights)
///
/// The chroma weights `SC` and `SH` use the geometric mean of both chromas
/// instead of the first color's chroma, which makes the metric symmetric.
/// For equal chromas this is identical to the reference-color form.
pub fn cie94(lab1: &Lab, lab2: &Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);

    let dl = lab1.l - lab2.l;
    let dc = c1 - c2;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    let dh = (da * da + db * db - dc * dc).max(0.0).sqrt();

    let chroma = (c1 * c2).sqrt();
    let sl = 1.0;
    let sc = 1.0 + delta_e::CIE94_K1 * chroma;
    let sh = 1.0 + delta_e::CIE94_K2 * chroma;

    let l_term = dl / (delta_e::CIE94_KL * sl);
    let c_term = dc / sc;
    let h_term = dh / sh;

    (l_term * l_term + c_term * c_term + h_term * h_term).sqrt()
}

/// CIEDE2000 color difference (CIE 142-2001, kL = kC = kH = 1)
///
/// Follows Sharma, Wu & Dalal (2005), including the hue-rotation term `RT`
/// and the mean-hue branch for hue differences above 180 degrees.
pub fn ciede2000(lab1: &Lab, lab2: &Lab) -> f64 {
    let c1 = lab1.a.hypot(lab1.b);
    let c2 = lab2.a.hypot(lab2.b);
    let c_mean7 = ((c1 + c2) / 2.0).powi(7);
    let g = 0.5 * (1.0 - (c_mean7 / (c_mean7 + delta_e::POW25_7)).sqrt());

    let a1p = lab1.a * (1.0 + g);
    let a2p = lab2.a * (1.0 + g);
    let c1p = a1p.hypot(lab1.b);
    let c2p = a2p.hypot(lab2.b);
    let h1p = hue_degrees(lab1.b, a1p);
    let h2p = hue_degrees(lab2.b, a2p);

    let delta_lp = lab2.l - lab1.l;
    let delta_cp = c2p - c1p;

    let chroma_product = c1p * c2p;
    let delta_hp = if chroma_product == 0.0 {
        0.0
    } else {
        let diff = h2p - h1p;
        if diff > 180.0 {
            diff - 360.0
        } else if diff < -180.0 {
            diff + 360.0
        } else {
            diff
        }
    };
    let delta_big_hp = 2.0 * chroma_product.sqrt() * (delta_hp / 2.0).to_radians().sin();

    let l_bar = (lab1.l + lab2.l) / 2.0;
    let c_bar = (c1p + c2p) / 2.0;
    let h_bar = if chroma_product == 0.0 {
        h1p + h2p
    } else if (h1p - h2p).abs() <= 180.0 {
        (h1p + h2p) / 2.0
    } else if h1p + h2p < 360.0 {
        (h1p + h2p + 360.0) / 2.0
    } else {
        (h1p + h2p - 360.0) / 2.0
    };

    let t = 1.0 - 0.17 * (h_bar - 30.0).to_radians().cos()
        + 0.24 * (2.0 * h_bar).to_radians().cos()
        + 0.32 * (3.0 * h_bar + 6.0).to_radians().cos()
        - 0.20 * (4.0 * h_bar - 63.0).to_radians().cos();

    let delta_theta = 30.0 * (-((h_bar - 275.0) / 25.0).powi(2)).exp();
    let c_bar7 = c_bar.powi(7);
    let rc = 2.0 * (c_bar7 / (c_bar7 + delta_e::POW25_7)).sqrt();

    let l_offset = (l_bar - 50.0).powi(2);
    let sl = 1.0 + 0.015 * l_offset / (20.0 + l_offset).sqrt();
    let sc = 1.0 + 0.045 * c_bar;
    let sh = 1.0 + 0.015 * c_bar * t;
    let rt = -(2.0 * delta_theta).to_radians().sin() * rc;

    let l_term = delta_lp / sl;
    let c_term = delta_cp / sc;
    let h_term = delta_big_hp / sh;

    (l_term * l_term + c_term * c_term + h_term * h_term + rt * c_term * h_term)
        .max(0.0)
        .sqrt()
}

/// atan2-based hue angle in [0, 360)
fn hue_degrees(b: f64, a_prime: f64) -> f64 {
    if b == 0.0 && a_prime == 0.0 {
        0.0
    } else {
        b.atan2(a_prime).to_degrees().rem_euclid(360.0)
    }
}

/// All distance metrics for one pair of colors
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceReport {
    pub euclidean: f64,
    #[serde(rename = "deltaE76")]
    pub delta_e76: f64,
    #[serde(rename = "deltaE94")]
    pub delta_e94: f64,
    #[serde(rename = "deltaE2000")]
    pub delta_e2000: f64,
}

impl DistanceReport {
    pub fn get(&self, metric: DistanceMetric) -> f64 {
        match metric {
            DistanceMetric::Euclidean => self.euclidean,
            DistanceMetric::DeltaE76 => self.delta_e76,
            DistanceMetric::DeltaE94 => self.delta_e94,
            DistanceMetric::DeltaE2000 => self.delta_e2000,
        }
    }

    /// Metric name and value pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        DistanceMetric::ALL
            .iter()
            .map(move |metric| (metric.name(), self.get(*metric)))
    }
}

/// Compute every metric, converting each color to Lab only once
pub fn distance_report(c1: Rgb, c2: Rgb) -> DistanceReport {
    let lab1 = c1.to_lab();
    let lab2 = c2.to_lab();
    DistanceReport {
        euclidean: euclidean(c1, c2),
        delta_e76: cie76(&lab1, &lab2),
        delta_e94: cie94(&lab1, &lab2),
        delta_e2000: ciede2000(&lab1, &lab2),
    }
}

/// Similarity percentage between two colors for a named metric
///
/// # Errors
///
/// Returns `ColorError::UnknownMetric` if `metric` is not a supported name
pub fn similarity_percentage(c1: Rgb, c2: Rgb, metric: &str) -> Result<f64> {
    let metric: DistanceMetric = metric.parse()?;
    Ok(metric.similarity(c1, c2))
}
