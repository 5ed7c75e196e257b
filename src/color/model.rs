//! Plain color value types shared by the engine
//!
//! `Rgb` carries real-valued channels on the nominal 0-255 scale, `Lab`
//! carries CIE L*a*b* coordinates under D65.

use palette::{white_point::D65, FromColor, Lch};
use serde::{Deserialize, Serialize};

use crate::{MatchError, Result};

/// sRGB color with channels on the nominal [0, 255] scale
///
/// Channels are not assumed integral: the mean of a region is generally
/// fractional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channels in r, g, b order
    pub fn channels(&self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// Fail with `InvalidInput` if any channel is NaN or infinite
    pub fn ensure_finite(&self) -> Result<()> {
        for (name, value) in [("r", self.r), ("g", self.g), ("b", self.b)] {
            if !value.is_finite() {
                return Err(MatchError::invalid_input(
                    format!("rgb.{}", name),
                    format!("channel must be finite, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r as f64, g as f64, b as f64)
    }
}

/// CIE L*a*b* color under the D65 illuminant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lab {
    /// Lightness, nominally [0, 100]
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl Lab {
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Fail with `InvalidInput` if any component is NaN or infinite
    pub fn ensure_finite(&self) -> Result<()> {
        for (name, value) in [("l", self.l), ("a", self.a), ("b", self.b)] {
            if !value.is_finite() {
                return Err(MatchError::invalid_input(
                    format!("lab.{}", name),
                    format!("component must be finite, got {}", value),
                ));
            }
        }
        Ok(())
    }

    /// Cylindrical view of this color: (lightness, chroma, hue in degrees)
    ///
    /// Hue is in [0, 360). Used for display only.
    pub fn to_lch(&self) -> (f64, f64, f64) {
        let lch = Lch::<D65, f64>::from_color(palette::Lab::<D65, f64>::from(*self));
        (lch.l, lch.chroma, lch.hue.into_positive_degrees())
    }
}

impl From<Lab> for palette::Lab<D65, f64> {
    fn from(lab: Lab) -> Self {
        palette::Lab::new(lab.l, lab.a, lab.b)
    }
}
