//! Named color classification
//!
//! Nearest-neighbor lookup of a color against an ordered table of named
//! reference colors, plus qualitative brightness and saturation wording.
//!
//! The built-in table is versioned by [`BUILTIN_TABLE_VERSION`]; any change
//! to its entries or their order must bump the version because it changes
//! classification results.

use std::fmt;
use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::color::{euclidean, Rgb};
use crate::config::ClassificationConfig;
use crate::constants::{description, normalization};
use crate::{ColorError, Result};

/// Version of the built-in named color table
pub const BUILTIN_TABLE_VERSION: u32 = 1;

const BUILTIN_COLORS: [(&str, [u8; 3]); 17] = [
    ("red", [255, 0, 0]),
    ("green", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("white", [255, 255, 255]),
    ("black", [0, 0, 0]),
    ("gray", [128, 128, 128]),
    ("orange", [255, 165, 0]),
    ("purple", [128, 0, 128]),
    ("brown", [165, 42, 42]),
    ("pink", [255, 192, 203]),
    ("navy", [0, 0, 128]),
    ("teal", [0, 128, 128]),
    ("indigo", [75, 0, 130]),
    ("violet", [238, 130, 238]),
];

/// A named reference color
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedColor {
    pub name: String,
    pub rgb: Rgb,
}

/// Ordered, read-only table of named colors
///
/// Iteration order breaks classification ties: the first entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedColorTable {
    entries: Vec<NamedColor>,
    version: Option<u32>,
}

/// On-disk entry: `{ "name": "red", "rgb": [255, 0, 0] }`
#[derive(Deserialize)]
struct TableEntry {
    name: String,
    rgb: [u8; 3],
}

impl NamedColorTable {
    /// The process-wide built-in table, initialized once
    pub fn builtin() -> &'static NamedColorTable {
        static TABLE: OnceLock<NamedColorTable> = OnceLock::new();
        TABLE.get_or_init(|| NamedColorTable {
            entries: BUILTIN_COLORS
                .iter()
                .map(|(name, rgb)| NamedColor {
                    name: (*name).to_string(),
                    rgb: Rgb::from(*rgb),
                })
                .collect(),
            version: Some(BUILTIN_TABLE_VERSION),
        })
    }

    /// Build a custom table; order is preserved
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidParameter` if `entries` is empty
    pub fn new(entries: Vec<NamedColor>) -> Result<Self> {
        if entries.is_empty() {
            return Err(ColorError::InvalidParameter {
                parameter: "named_colors".into(),
                value: "empty table".into(),
            });
        }
        Ok(Self {
            entries,
            version: None,
        })
    }

    /// Load a table from a JSON array of `{ "name", "rgb": [r, g, b] }` objects
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ColorError::config(format!("Failed to read color table {}", path.display()), e)
        })?;
        let raw: Vec<TableEntry> = serde_json::from_str(&content).map_err(|e| {
            ColorError::config(format!("Failed to parse color table {}", path.display()), e)
        })?;

        log::debug!("Loaded {} named colors from {}", raw.len(), path.display());

        Self::new(
            raw.into_iter()
                .map(|entry| NamedColor {
                    name: entry.name,
                    rgb: Rgb::from(entry.rgb),
                })
                .collect(),
        )
    }

    /// Built-in table version, `None` for custom tables
    pub fn version(&self) -> Option<u32> {
        self.version
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedColor> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<Rgb> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.rgb)
    }

    /// Closest entry by RGB Euclidean distance, first entry on ties
    fn nearest(&self, color: Rgb) -> (&NamedColor, f64) {
        let mut best = &self.entries[0];
        let mut best_distance = euclidean(color, best.rgb);
        for entry in &self.entries[1..] {
            let distance = euclidean(color, entry.rgb);
            if distance < best_distance {
                best = entry;
                best_distance = distance;
            }
        }
        (best, best_distance)
    }
}

/// Nearest named color and how close it is
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub name: String,
    /// `1 - distance / 441.7`, clamped to [0, 1]
    pub confidence: f64,
}

/// Luma-based brightness bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Brightness {
    Dark,
    Medium,
    Bright,
}

/// Saturation bucket; mid-range saturation has no qualifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Saturation {
    Grayish,
    Vivid,
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Brightness::Dark => "dark",
            Brightness::Medium => "medium",
            Brightness::Bright => "bright",
        })
    }
}

impl fmt::Display for Saturation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Saturation::Grayish => "grayish",
            Saturation::Vivid => "vivid",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorProperties {
    pub brightness: Brightness,
    pub saturation: Option<Saturation>,
}

/// Full qualitative description of a color
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorDescription {
    pub name: String,
    /// e.g. "dark vivid red" or "medium gray"
    pub full_description: String,
    pub confidence: f64,
    /// Luma in [0, 1]
    pub brightness: f64,
    /// HSV saturation in [0, 1]
    pub saturation: f64,
    pub properties: ColorProperties,
}

/// Bucket boundaries for [`ColorClassifier::describe`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescriptionThresholds {
    pub dark: f64,
    pub bright: f64,
    pub grayish: f64,
    pub vivid: f64,
}

impl Default for DescriptionThresholds {
    fn default() -> Self {
        Self {
            dark: description::DARK_THRESHOLD,
            bright: description::BRIGHT_THRESHOLD,
            grayish: description::GRAYISH_THRESHOLD,
            vivid: description::VIVID_THRESHOLD,
        }
    }
}

/// Nearest-neighbor color classifier
#[derive(Debug, Clone)]
pub struct ColorClassifier {
    table: NamedColorTable,
    thresholds: DescriptionThresholds,
}

impl Default for ColorClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorClassifier {
    /// Classifier over the built-in table
    pub fn new() -> Self {
        Self {
            table: NamedColorTable::builtin().clone(),
            thresholds: DescriptionThresholds::default(),
        }
    }

    pub fn with_table(table: NamedColorTable) -> Self {
        Self {
            table,
            thresholds: DescriptionThresholds::default(),
        }
    }

    /// Build from configuration, loading an external table if one is set
    pub fn from_config(config: &ClassificationConfig) -> Result<Self> {
        let table = match &config.named_colors_path {
            Some(path) => NamedColorTable::from_json_file(path)?,
            None => NamedColorTable::builtin().clone(),
        };
        Ok(Self {
            table,
            thresholds: DescriptionThresholds {
                dark: config.dark_threshold,
                bright: config.bright_threshold,
                grayish: config.grayish_threshold,
                vivid: config.vivid_threshold,
            },
        })
    }

    pub fn table(&self) -> &NamedColorTable {
        &self.table
    }

    /// Name the closest table color
    pub fn classify(&self, color: Rgb) -> Classification {
        let (entry, distance) = self.table.nearest(color);
        Classification {
            name: entry.name.clone(),
            confidence: (1.0 - distance / normalization::CLASSIFIER_MAX_DISTANCE).clamp(0.0, 1.0),
        }
    }

    /// Classify and describe brightness and saturation
    pub fn describe(&self, color: Rgb) -> ColorDescription {
        let Classification { name, confidence } = self.classify(color);

        let brightness = luma(color);
        let saturation = hsv_saturation(color);

        let brightness_level = if brightness < self.thresholds.dark {
            Brightness::Dark
        } else if brightness > self.thresholds.bright {
            Brightness::Bright
        } else {
            Brightness::Medium
        };
        let saturation_level = if saturation < self.thresholds.grayish {
            Some(Saturation::Grayish)
        } else if saturation > self.thresholds.vivid {
            Some(Saturation::Vivid)
        } else {
            None
        };

        let full_description = match saturation_level {
            Some(level) => format!("{} {} {}", brightness_level, level, name),
            None => format!("{} {}", brightness_level, name),
        };

        ColorDescription {
            name,
            full_description,
            confidence,
            brightness,
            saturation,
            properties: ColorProperties {
                brightness: brightness_level,
                saturation: saturation_level,
            },
        }
    }
}

/// Rec. 601 luma in [0, 1]
fn luma(color: Rgb) -> f64 {
    (0.299 * color.r as f64 + 0.587 * color.g as f64 + 0.114 * color.b as f64) / 255.0
}

/// HSV saturation in [0, 1]
fn hsv_saturation(color: Rgb) -> f64 {
    let max = color.r.max(color.g).max(color.b) as f64 / 255.0;
    let min = color.r.min(color.g).min(color.b) as f64 / 255.0;
    if max == 0.0 {
        0.0
    } else {
        (max - min) / max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_table() {
        let table = NamedColorTable::builtin();
        assert_eq!(table.version(), Some(BUILTIN_TABLE_VERSION));
        assert!((14..=18).contains(&table.len()));
        assert_eq!(table.get("red"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(table.iter().next().map(|e| e.name.as_str()), Some("red"));
    }

    #[test]
    fn test_classify_exact_matches() {
        let classifier = ColorClassifier::new();
        for entry in NamedColorTable::builtin().iter() {
            let result = classifier.classify(entry.rgb);
            assert_eq!(result.name, entry.name);
            assert_eq!(result.confidence, 1.0);
        }
    }

    #[test]
    fn test_classify_hex_examples() {
        let classifier = ColorClassifier::new();
        assert_eq!(classifier.classify(Rgb::from_hex("#FF0000").unwrap()).name, "red");
        assert_eq!(classifier.classify(Rgb::from_hex("#000000").unwrap()).name, "black");
        assert_eq!(classifier.classify(Rgb::new(250, 10, 5)).name, "red");
    }

    #[test]
    fn test_classify_confidence_range() {
        let classifier = ColorClassifier::new();
        let result = classifier.classify(Rgb::new(200, 100, 60));
        assert!(result.confidence > 0.0 && result.confidence < 1.0);
    }

    #[test]
    fn test_classify_tie_first_entry_wins() {
        let table = NamedColorTable::new(vec![
            NamedColor { name: "low".into(), rgb: Rgb::new(0, 0, 0) },
            NamedColor { name: "high".into(), rgb: Rgb::new(20, 0, 0) },
        ])
        .unwrap();
        let classifier = ColorClassifier::with_table(table);
        assert_eq!(classifier.classify(Rgb::new(10, 0, 0)).name, "low");
    }

    #[test]
    fn test_empty_table_rejected() {
        assert!(matches!(
            NamedColorTable::new(Vec::new()),
            Err(ColorError::InvalidParameter { .. })
        ));
    }

    #[test]
    fn test_describe_vivid_red() {
        let description = ColorClassifier::new().describe(Rgb::new(255, 0, 0));
        // Luma of pure red is 0.299
        assert_eq!(description.properties.brightness, Brightness::Dark);
        assert_eq!(description.properties.saturation, Some(Saturation::Vivid));
        assert_eq!(description.full_description, "dark vivid red");
    }

    #[test]
    fn test_describe_gray() {
        let description = ColorClassifier::new().describe(Rgb::new(128, 128, 128));
        assert_eq!(description.saturation, 0.0);
        assert_eq!(description.full_description, "medium grayish gray");
    }

    #[test]
    fn test_describe_without_saturation_token() {
        // Saturation (200 - 100) / 200 = 0.5 has no qualifier
        let description = ColorClassifier::new().describe(Rgb::new(200, 150, 100));
        assert_eq!(description.properties.saturation, None);
        assert_eq!(description.full_description.split(' ').count(), 2);
        assert!(description.full_description.starts_with("medium "));
    }

    #[test]
    fn test_describe_black_and_white() {
        let classifier = ColorClassifier::new();
        assert_eq!(classifier.describe(Rgb::BLACK).full_description, "dark grayish black");
        assert_eq!(classifier.describe(Rgb::WHITE).full_description, "bright grayish white");
    }

    #[test]
    fn test_description_serialization() {
        let description = ColorClassifier::new().describe(Rgb::new(255, 0, 0));
        let json = serde_json::to_value(&description).unwrap();
        assert_eq!(json["fullDescription"], "dark vivid red");
        assert_eq!(json["properties"]["saturation"], "vivid");
    }

    #[test]
    fn test_table_from_json_file() {
        let path = std::env::temp_dir().join("colorlens_test_table.json");
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"[{{"name": "ink", "rgb": [10, 20, 30]}}, {{"name": "paper", "rgb": [250, 250, 240]}}]"#).unwrap();

        let table = NamedColorTable::from_json_file(&path).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.version(), None);

        let classifier = ColorClassifier::with_table(table);
        assert_eq!(classifier.classify(Rgb::new(0, 0, 0)).name, "ink");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_table_from_missing_file() {
        let result = NamedColorTable::from_json_file(Path::new("/nonexistent/colors.json"));
        assert!(matches!(result, Err(ColorError::ConfigError { .. })));
    }
}
