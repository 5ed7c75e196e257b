//! # Swatch Match
//!
//! A Rust crate for deciding which of two reference colors a sampled color
//! more closely resembles, measured in CIE L*a*b* rather than raw RGB.
//!
//! This library provides:
//! - sRGB to Lab conversion under the D65 illuminant
//! - CIE76 color difference (ΔE)
//! - Robust representative color extraction from a selected pixel region
//! - Two-reference classification into a percentage split and a separation label
//! - Comparison records with an injected repository, CSV/JSON interchange and
//!   re-evaluation of saved comparisons
//!
//! ## Example
//!
//! ```rust
//! use swatch_match::{classify, ColorData};
//! use swatch_match::color::Rgb;
//!
//! let ref_a = ColorData::from_rgb(Rgb::new(255.0, 0.0, 0.0))?;
//! let ref_b = ColorData::from_rgb(Rgb::new(0.0, 0.0, 255.0))?;
//! let sample = ColorData::from_rgb(Rgb::new(230.0, 20.0, 40.0))?;
//!
//! let metrics = classify(&sample, &ref_a, &ref_b)?;
//! println!("{:.1}% toward A ({})", metrics.toward_a, metrics.separation_label);
//! # Ok::<(), swatch_match::MatchError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod error;
pub mod constants;
pub mod color;
pub mod sampling;
pub mod comparison;
pub mod record;
pub mod repository;
pub mod interchange;
pub mod image_loader;
pub mod config;
pub mod workflow;

pub use error::{MatchError, Result};
pub use color::{delta_e76, rgb_to_lab, to_hex, Lab, Rgb};
pub use sampling::{sample_region, RegionPixels, RegionSample};
pub use comparison::{
    classify, Closer, ComparisonClassifier, ComparisonMetrics, SeparationLabel,
    SeparationThresholds,
};
pub use record::{ComparisonRecord, Feedback, NamedColor};
pub use repository::{ComparisonRepository, InMemoryRepository, JsonFileRepository};
pub use config::MatchConfig;

/// Immutable snapshot of a captured color
///
/// `rgb` is the primary (median) statistic and `hex` is its canonical string.
/// `avg_rgb` is the mean of the same region, kept for secondary display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorData {
    /// Canonical `#rrggbb` form of `rgb`
    pub hex: String,
    /// Representative color
    pub rgb: Rgb,
    /// Lab value derived from `rgb`
    pub lab: Lab,
    /// Mean color of the sampled region
    pub avg_rgb: Rgb,
}

impl ColorData {
    /// Build color data from a single RGB value (mean equals the color)
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` if any channel is not finite.
    pub fn from_rgb(rgb: Rgb) -> Result<Self> {
        Self::from_statistics(rgb, rgb)
    }

    /// Build color data from region statistics, using the median as the color
    pub fn from_sample(sample: RegionSample) -> Result<Self> {
        Self::from_statistics(sample.median, sample.mean)
    }

    /// Sample an RGBA region and build color data from it
    ///
    /// # Errors
    ///
    /// - `MatchError::EmptyRegion` for a zero-pixel region
    /// - `MatchError::InvalidInput` if the buffer does not match the dimensions
    pub fn from_region(pixels: &[u8], width: u32, height: u32) -> Result<Self> {
        Self::from_sample(sample_region(pixels, width, height)?)
    }

    fn from_statistics(rgb: Rgb, avg_rgb: Rgb) -> Result<Self> {
        let lab = rgb_to_lab(rgb)?;
        Ok(Self {
            hex: to_hex(rgb),
            rgb,
            lab,
            avg_rgb,
        })
    }
}
