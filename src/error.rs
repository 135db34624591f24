//! Error types for the colorlens library

use thiserror::Error;

/// Result type alias for colorlens operations
pub type Result<T> = std::result::Result<T, ColorError>;

/// Error kinds raised by the color analysis engine
#[derive(Error, Debug)]
pub enum ColorError {
    /// Hex string is not exactly 6 hex digits after stripping an optional `#`
    #[error("Invalid color format '{input}': {reason}")]
    InvalidColorFormat { input: String, reason: String },

    /// RGB channel outside [0, 255] under strict validation
    #[error("Channel {channel} out of range: {value} (expected 0-255)")]
    InvalidChannelRange { channel: &'static str, value: i64 },

    /// Pixel sequence is empty or has an incompatible shape
    #[error("Invalid image data: {reason}")]
    InvalidImageData { reason: String },

    /// Requested cluster count is zero or exceeds the number of pixels
    #[error("Invalid cluster count: {requested} (image has {pixel_count} pixels)")]
    InvalidClusterCount { requested: usize, pixel_count: usize },

    /// Distance metric name outside the supported set
    #[error("Unknown distance metric: {name}")]
    UnknownMetric { name: String },

    /// Image file could not be opened or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration or named-color table could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid configuration parameter
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl ColorError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub(crate) fn invalid_hex(input: &str, reason: impl Into<String>) -> Self {
        Self::InvalidColorFormat {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Check if this error was caused by bad caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            ColorError::InvalidColorFormat { .. }
                | ColorError::InvalidChannelRange { .. }
                | ColorError::InvalidImageData { .. }
                | ColorError::InvalidClusterCount { .. }
                | ColorError::UnknownMetric { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            ColorError::InvalidColorFormat { input, .. } => {
                format!("'{}' is not a valid color. Use a 6-digit hex code such as #ff8800.", input)
            }
            ColorError::InvalidChannelRange { channel, .. } => {
                format!("The {} channel must be between 0 and 255.", channel)
            }
            ColorError::InvalidImageData { .. } => {
                "The image contains no usable pixel data.".to_string()
            }
            ColorError::InvalidClusterCount { requested, pixel_count } => {
                format!(
                    "Cannot extract {} colors from an image with {} pixels.",
                    requested, pixel_count
                )
            }
            ColorError::UnknownMetric { name } => {
                format!(
                    "Unknown metric '{}'. Use euclidean, deltaE76, deltaE94 or deltaE2000.",
                    name
                )
            }
            ColorError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            _ => "Color analysis failed. Please check the configuration.".to_string(),
        }
    }
}
