//! CIE76 color difference
//!
//! Plain Euclidean distance in L*a*b*. It does not weight hue or lightness;
//! the separation thresholds in [`crate::constants::separation`] were tuned
//! against it.

use crate::{MatchError, Result};

use super::model::Lab;

/// Compute ΔE76 between two Lab colors
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` if either color has a non-finite
/// component or the difference itself overflows.
pub fn delta_e76(lab1: Lab, lab2: Lab) -> Result<f64> {
    lab1.ensure_finite()?;
    lab2.ensure_finite()?;

    let dl = lab1.l - lab2.l;
    let da = lab1.a - lab2.a;
    let db = lab1.b - lab2.b;
    let distance = (dl * dl + da * da + db * db).sqrt();
    if !distance.is_finite() {
        return Err(MatchError::invalid_input("lab", "color difference overflows f64"));
    }
    Ok(distance)
}
