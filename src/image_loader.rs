//! Image decoding into engine pixel buffers
//!
//! This module is the boundary between files on disk and the engine's
//! `&[Rgb]` inputs. Decoding goes through the `image` crate; every format is
//! converted to 8-bit RGB, dropping any alpha channel.
//!
//! ## Supported Formats
//!
//! - JPEG, PNG, BMP, WebP
//!
//! ## Downsampling
//!
//! Clustering cost grows with pixel count, so callers usually shrink large
//! images first with [`PixelBuffer::downsample`]. The extractor itself
//! accepts any positive-size pixel sequence.

use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage};

use crate::color::Rgb;
use crate::error::{ColorError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Bmp,
    WebP,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "bmp" => Some(ImageFormat::Bmp),
            "webp" => Some(ImageFormat::WebP),
            _ => None,
        }
    }
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png", "bmp", "webp"]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

/// Decoded RGB image of positive size
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    image: RgbImage,
}

impl PixelBuffer {
    /// Wrap a row-major RGB byte buffer
    ///
    /// # Errors
    ///
    /// Returns `ColorError::InvalidImageData` if either dimension is zero or
    /// `bytes.len() != width * height * 3`
    pub fn from_raw(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(ColorError::InvalidImageData {
                reason: format!("image has zero size ({}x{})", width, height),
            });
        }
        let expected = width as usize * height as usize * 3;
        if bytes.len() != expected {
            return Err(ColorError::InvalidImageData {
                reason: format!(
                    "expected {} bytes for {}x{} RGB, got {}",
                    expected,
                    width,
                    height,
                    bytes.len()
                ),
            });
        }
        let image = RgbImage::from_raw(width, height, bytes).ok_or_else(|| {
            ColorError::InvalidImageData {
                reason: "buffer does not match dimensions".into(),
            }
        })?;
        Ok(Self { image })
    }

    /// Convert any decoded image to RGB8
    pub fn from_image(image: &DynamicImage) -> Result<Self> {
        let rgb = image.to_rgb8();
        if rgb.width() == 0 || rgb.height() == 0 {
            return Err(ColorError::InvalidImageData {
                reason: format!("image has zero size ({}x{})", rgb.width(), rgb.height()),
            });
        }
        Ok(Self { image: rgb })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn len(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Always false; zero-size buffers cannot be constructed
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> Vec<Rgb> {
        self.image.pixels().map(|p| Rgb::from(*p)).collect()
    }

    /// Shrink so neither side exceeds `max_dimension`, preserving aspect ratio
    ///
    /// Buffers already within bounds are returned unchanged; nothing is upscaled.
    pub fn downsample(&self, max_dimension: u32) -> PixelBuffer {
        let max_dimension = max_dimension.max(1);
        if self.width() <= max_dimension && self.height() <= max_dimension {
            return self.clone();
        }

        let thumbnail = DynamicImage::ImageRgb8(self.image.clone())
            .thumbnail(max_dimension, max_dimension)
            .to_rgb8();

        log::debug!(
            "Downsampled {}x{} to {}x{}",
            self.width(),
            self.height(),
            thumbnail.width(),
            thumbnail.height()
        );

        PixelBuffer { image: thumbnail }
    }
}

/// Load an image from disk as an RGB pixel buffer
///
/// # Errors
///
/// Returns `ColorError::ImageLoadError` if:
/// - The extension is not one of [`supported_extensions`]
/// - File cannot be opened
/// - Decoding fails
///
/// # Example
///
/// ```rust,no_run
/// use colorlens::image_loader::load_pixels;
/// use std::path::Path;
///
/// let buffer = load_pixels(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", buffer.width(), buffer.height());
/// # Ok::<(), colorlens::ColorError>(())
/// ```
pub fn load_pixels(path: &Path) -> Result<PixelBuffer> {
    if ImageFormat::from_extension(path).is_none() {
        return Err(ColorError::ImageLoadError {
            message: format!("Unsupported image format: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        ColorError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let image = reader.decode().map_err(|e| {
        ColorError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    log::debug!(
        "Loaded {} ({}x{})",
        path.display(),
        image.width(),
        image.height()
    );

    PixelBuffer::from_image(&image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32, color: [u8; 3]) -> PixelBuffer {
        let bytes = color.repeat((width * height) as usize);
        PixelBuffer::from_raw(width, height, bytes).unwrap()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("photo.gif")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("photo")), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("PNG"));
        assert!(is_supported_extension("bmp"));
        assert!(!is_supported_extension("heic"));
        assert!(!is_supported_extension("doc"));
    }

    #[test]
    fn test_from_raw_pixel_order() {
        let bytes = vec![
            255, 0, 0, // Red
            0, 255, 0, // Green
            0, 0, 255, // Blue
            255, 255, 255, // White
        ];
        let buffer = PixelBuffer::from_raw(2, 2, bytes).unwrap();
        assert_eq!(buffer.len(), 4);
        assert_eq!(
            buffer.pixels(),
            vec![
                Rgb::new(255, 0, 0),
                Rgb::new(0, 255, 0),
                Rgb::new(0, 0, 255),
                Rgb::WHITE
            ]
        );
    }

    #[test]
    fn test_from_raw_rejects_bad_shape() {
        assert!(matches!(
            PixelBuffer::from_raw(0, 5, Vec::new()),
            Err(ColorError::InvalidImageData { .. })
        ));
        assert!(matches!(
            PixelBuffer::from_raw(2, 2, vec![0; 11]),
            Err(ColorError::InvalidImageData { .. })
        ));
    }

    #[test]
    fn test_from_image_drops_alpha() {
        let rgba = image::RgbaImage::from_pixel(3, 2, image::Rgba([10, 20, 30, 128]));
        let buffer = PixelBuffer::from_image(&DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!(buffer.pixels(), vec![Rgb::new(10, 20, 30); 6]);
    }

    #[test]
    fn test_downsample_preserves_aspect() {
        let buffer = solid(400, 100, [50, 60, 70]);
        let small = buffer.downsample(200);
        assert_eq!((small.width(), small.height()), (200, 50));
        assert!(small.pixels().iter().all(|p| *p == Rgb::new(50, 60, 70)));
    }

    #[test]
    fn test_downsample_never_upscales() {
        let buffer = solid(100, 40, [1, 2, 3]);
        assert_eq!(buffer.downsample(200), buffer);
    }

    #[test]
    fn test_load_pixels_png() {
        let path = std::env::temp_dir().join("colorlens_test_load.png");
        let image = RgbImage::from_pixel(4, 3, image::Rgb([200, 10, 90]));
        image.save(&path).unwrap();

        let buffer = load_pixels(&path).unwrap();
        assert_eq!((buffer.width(), buffer.height()), (4, 3));
        assert_eq!(buffer.pixels()[0], Rgb::new(200, 10, 90));

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_pixels_errors() {
        let unsupported = load_pixels(Path::new("notes.txt"));
        assert!(matches!(unsupported, Err(ColorError::ImageLoadError { source: None, .. })));

        let missing = load_pixels(Path::new("/nonexistent/photo.png"));
        assert!(matches!(missing, Err(ColorError::ImageLoadError { source: Some(_), .. })));
    }
}
