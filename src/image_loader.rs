//! Still image loading and region cropping
//!
//! Decodes a captured still with the `image` crate and crops a selection
//! rectangle into the RGBA buffer the sampler consumes. Coordinates are in
//! image pixels; mapping from screen space belongs to the selection UI.
//!
//! ## Supported Formats
//!
//! JPEG, PNG, GIF (first frame), WebP, TIFF, BMP

use std::path::Path;

use image::{ImageReader, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sampling::RegionPixels;
use crate::{MatchError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    /// First frame only
    Gif,
    WebP,
    Tiff,
    Bmp,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }
}

/// Rectangular selection in image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Selection {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Reject selections smaller than `min_width` x `min_height`
    pub fn ensure_min_size(&self, min_width: u32, min_height: u32) -> Result<()> {
        if self.width < min_width || self.height < min_height {
            return Err(MatchError::SelectionTooSmall {
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }

    /// Reject selections that extend past a `width` x `height` image
    pub fn ensure_within(&self, width: u32, height: u32) -> Result<()> {
        let fits = |start: u32, len: u32, bound: u32| {
            start.checked_add(len).is_some_and(|end| end <= bound)
        };
        if !fits(self.x, self.width, width) || !fits(self.y, self.height, height) {
            return Err(MatchError::SelectionOutOfBounds {
                x: self.x,
                y: self.y,
                width: self.width,
                height: self.height,
                image_width: width,
                image_height: height,
            });
        }
        Ok(())
    }
}

/// Load an image from disk as 8-bit RGBA
///
/// # Errors
///
/// Returns `MatchError::ImageLoadError` if the format is unknown, the file
/// cannot be opened or decoding fails.
///
/// # Example
///
/// ```rust,no_run
/// use swatch_match::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("photo.jpg"))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), swatch_match::MatchError>(())
/// ```
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let format = ImageFormat::from_extension(path).ok_or_else(|| MatchError::ImageLoadError {
        message: format!("Unknown image format for file: {}", path.display()),
        source: None,
    })?;

    let reader = ImageReader::open(path).map_err(|e| {
        MatchError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let image = reader.decode().map_err(|e| {
        MatchError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    let rgba = image.to_rgba8();
    debug!(
        path = %path.display(),
        ?format,
        width = rgba.width(),
        height = rgba.height(),
        "image loaded"
    );
    Ok(rgba)
}

/// Copy the pixels under `selection` into a standalone RGBA buffer
///
/// # Errors
///
/// Returns `MatchError::SelectionOutOfBounds` if the selection does not fit
/// inside the image.
pub fn crop_region(image: &RgbaImage, selection: Selection) -> Result<RegionPixels> {
    selection.ensure_within(image.width(), image.height())?;

    let view = image::imageops::crop_imm(
        image,
        selection.x,
        selection.y,
        selection.width,
        selection.height,
    );
    let data = view.to_image().into_raw();

    Ok(RegionPixels {
        width: selection.width,
        height: selection.height,
        data,
    })
}
