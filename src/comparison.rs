//! Two-reference classification of a sample color
//!
//! Given a sample and references A and B, computes both ΔE76 distances and
//! turns them into a percentage split plus a qualitative separation label:
//! - `towardA = dB / (dA + dB) * 100`, `towardB` is its exact complement
//! - `separation = |dA - dB| / (dA + dB) * 100`
//! - Label ladder on `separation`: <5 Indistinguishable, <15 Weak, <30 Moderate, else Strong

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::delta_e76;
use crate::constants::separation;
use crate::{ColorData, MatchError, Result};

/// Qualitative strength of the preference for one reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeparationLabel {
    Indistinguishable,
    Weak,
    Moderate,
    Strong,
}

impl SeparationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SeparationLabel::Indistinguishable => "Indistinguishable",
            SeparationLabel::Weak => "Weak",
            SeparationLabel::Moderate => "Moderate",
            SeparationLabel::Strong => "Strong",
        }
    }
}

impl fmt::Display for SeparationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lower bounds of the Weak, Moderate and Strong bands, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeparationThresholds {
    pub weak: f64,
    pub moderate: f64,
    pub strong: f64,
}

impl Default for SeparationThresholds {
    fn default() -> Self {
        Self {
            weak: separation::WEAK,
            moderate: separation::MODERATE,
            strong: separation::STRONG,
        }
    }
}

impl SeparationThresholds {
    /// Check the bands are finite and strictly ascending
    pub fn validate(&self) -> Result<()> {
        let bounds = [self.weak, self.moderate, self.strong];
        if bounds.iter().any(|b| !b.is_finite()) {
            return Err(MatchError::invalid_input(
                "separation_thresholds",
                "thresholds must be finite",
            ));
        }
        if !(self.weak < self.moderate && self.moderate < self.strong) {
            return Err(MatchError::invalid_input(
                "separation_thresholds",
                format!(
                    "thresholds must ascend, got {} / {} / {}",
                    self.weak, self.moderate, self.strong
                ),
            ));
        }
        Ok(())
    }

    /// Map a separation percentage to its label; first matching band wins
    ///
    /// Each bound belongs to the band above it: exactly `weak` is Weak.
    pub fn label(&self, separation: f64) -> SeparationLabel {
        if separation < self.weak {
            SeparationLabel::Indistinguishable
        } else if separation < self.moderate {
            SeparationLabel::Weak
        } else if separation < self.strong {
            SeparationLabel::Moderate
        } else {
            SeparationLabel::Strong
        }
    }
}

/// Result of comparing a sample against two references
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonMetrics {
    /// ΔE76 between sample and reference A
    pub d_a: f64,
    /// ΔE76 between sample and reference B
    pub d_b: f64,
    /// Share of resemblance attributed to A, in [0, 100]
    pub toward_a: f64,
    /// Share of resemblance attributed to B, `100 - toward_a`
    pub toward_b: f64,
    /// How decisive the split is, in [0, 100]
    pub separation: f64,
    pub separation_label: SeparationLabel,
}

impl ComparisonMetrics {
    /// Reference the sample resembles more, `None` on an exact tie
    pub fn closer(&self) -> Option<Closer> {
        if self.d_a < self.d_b {
            Some(Closer::A)
        } else if self.d_b < self.d_a {
            Some(Closer::B)
        } else {
            None
        }
    }
}

/// Which reference a sample is closer to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Closer {
    A,
    B,
}

/// Classifier turning two ΔE distances into a split and a label
#[derive(Debug, Clone, Default)]
pub struct ComparisonClassifier {
    thresholds: SeparationThresholds,
}

impl ComparisonClassifier {
    /// Create a classifier with the default 5 / 15 / 30 ladder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with a custom label ladder
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` if the thresholds are not finite and ascending.
    pub fn with_thresholds(thresholds: SeparationThresholds) -> Result<Self> {
        thresholds.validate()?;
        Ok(Self { thresholds })
    }

    pub fn thresholds(&self) -> &SeparationThresholds {
        &self.thresholds
    }

    /// Classify `sample` against `ref_a` and `ref_b`
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` if any Lab value is not finite or a
    /// distance overflows.
    pub fn classify(
        &self,
        sample: &ColorData,
        ref_a: &ColorData,
        ref_b: &ColorData,
    ) -> Result<ComparisonMetrics> {
        let d_a = delta_e76(sample.lab, ref_a.lab)?;
        let d_b = delta_e76(sample.lab, ref_b.lab)?;
        self.metrics_from_distances(d_a, d_b)
    }

    /// Build metrics from two precomputed distances
    ///
    /// # Errors
    ///
    /// Returns `MatchError::InvalidInput` if a distance is negative or not
    /// finite, or if their sum overflows.
    pub fn metrics_from_distances(&self, d_a: f64, d_b: f64) -> Result<ComparisonMetrics> {
        for (name, value) in [("d_a", d_a), ("d_b", d_b)] {
            if !value.is_finite() || value < 0.0 {
                return Err(MatchError::invalid_input(
                    name,
                    format!("distance must be finite and non-negative, got {}", value),
                ));
            }
        }

        let total = d_a + d_b;
        if !total.is_finite() {
            return Err(MatchError::invalid_input("d_a + d_b", "sum of distances overflows"));
        }

        let (toward_a, toward_b) = if total > 0.0 {
            let toward_a = d_b / total * 100.0;
            // Complement rather than d_a / total so the pair sums to 100
            (toward_a, 100.0 - toward_a)
        } else {
            (50.0, 50.0)
        };

        let separation = if total > 0.0 {
            ((d_a - d_b).abs() / total * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };

        Ok(ComparisonMetrics {
            d_a,
            d_b,
            toward_a: toward_a.clamp(0.0, 100.0),
            toward_b: toward_b.clamp(0.0, 100.0),
            separation,
            separation_label: self.thresholds.label(separation),
        })
    }
}

/// Classify with the default label ladder
///
/// # Example
///
/// ```rust
/// use swatch_match::{classify, ColorData, SeparationLabel};
/// use swatch_match::color::Rgb;
///
/// let red = ColorData::from_rgb(Rgb::new(255.0, 0.0, 0.0))?;
/// let blue = ColorData::from_rgb(Rgb::new(0.0, 0.0, 255.0))?;
/// let metrics = classify(&red, &red, &blue)?;
/// assert_eq!(metrics.separation_label, SeparationLabel::Strong);
/// # Ok::<(), swatch_match::MatchError>(())
/// ```
pub fn classify(
    sample: &ColorData,
    ref_a: &ColorData,
    ref_b: &ColorData,
) -> Result<ComparisonMetrics> {
    ComparisonClassifier::new().classify(sample, ref_a, ref_b)
}
