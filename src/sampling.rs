//! Representative color extraction from a selected region
//!
//! Reduces an RGBA pixel buffer to two statistics per channel:
//! - Median: robust to specular highlights and sensor noise, used as the swatch color
//! - Mean: softer statistic kept for secondary display
//!
//! Alpha is ignored. Cost is O(n log n) per channel; selections are small.

use serde::{Deserialize, Serialize};

use crate::color::Rgb;
use crate::{MatchError, Result};

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Row-major RGBA buffer for a rectangular region
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionPixels {
    pub width: u32,
    pub height: u32,
    /// `width * height * 4` bytes, R, G, B, A per pixel
    pub data: Vec<u8>,
}

impl RegionPixels {
    /// Sample this region, see [`sample_region`]
    pub fn sample(&self) -> Result<RegionSample> {
        sample_region(&self.data, self.width, self.height)
    }
}

/// Per-channel statistics of a sampled region
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegionSample {
    /// Per-channel median
    pub median: Rgb,
    /// Per-channel arithmetic mean
    pub mean: Rgb,
}

/// Compute the per-channel median and mean of an RGBA region
///
/// # Arguments
///
/// * `pixels` - Row-major RGBA bytes, exactly `width * height * 4` long
/// * `width`, `height` - Region dimensions in pixels
///
/// # Errors
///
/// - `MatchError::EmptyRegion` if the region has no pixels
/// - `MatchError::InvalidInput` if the buffer length does not match the dimensions
///
/// # Example
///
/// ```rust
/// use swatch_match::sampling::sample_region;
///
/// let pixels = [10, 0, 0, 255, 50, 0, 0, 255, 90, 0, 0, 255];
/// let sample = sample_region(&pixels, 3, 1)?;
/// assert_eq!(sample.median.r, 50.0);
/// # Ok::<(), swatch_match::MatchError>(())
/// ```
pub fn sample_region(pixels: &[u8], width: u32, height: u32) -> Result<RegionSample> {
    let count = width as usize * height as usize;
    if count == 0 {
        return Err(MatchError::EmptyRegion { width, height });
    }

    let expected = count
        .checked_mul(BYTES_PER_PIXEL)
        .ok_or_else(|| MatchError::invalid_input("region", "dimensions overflow"))?;
    if pixels.len() != expected {
        return Err(MatchError::invalid_input(
            "pixels",
            format!(
                "expected {} bytes for {}x{} RGBA, got {}",
                expected,
                width,
                height,
                pixels.len()
            ),
        ));
    }

    let mut channels: [Vec<u8>; 3] = [
        Vec::with_capacity(count),
        Vec::with_capacity(count),
        Vec::with_capacity(count),
    ];
    for pixel in pixels.chunks_exact(BYTES_PER_PIXEL) {
        for (values, &byte) in channels.iter_mut().zip(pixel) {
            values.push(byte);
        }
    }

    let means = channels.each_ref().map(|values| mean(values));
    let medians = channels.map(|mut values| median(&mut values));

    Ok(RegionSample {
        median: Rgb::new(medians[0], medians[1], medians[2]),
        mean: Rgb::new(means[0], means[1], means[2]),
    })
}

fn mean(values: &[u8]) -> f64 {
    let sum: u64 = values.iter().map(|&v| v as u64).sum();
    sum as f64 / values.len() as f64
}

/// Median of a non-empty slice; even counts average the two middle values
fn median(values: &mut [u8]) -> f64 {
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        values[mid] as f64
    } else {
        (values[mid - 1] as f64 + values[mid] as f64) / 2.0
    }
}
