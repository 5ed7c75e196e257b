//! Color space conversion utilities
//!
//! Maps sRGB (channels 0-255) to CIE L*a*b* under the fixed D65 white:
//! - Remove the sRGB transfer curve
//! - Project linear RGB to XYZ
//! - Normalize by the reference white and apply the CIE companding
//!
//! Every call is independent; nothing is cached.

use crate::constants::{d65, lab, srgb};
use crate::{MatchError, Result};

use super::model::{Lab, Rgb};

/// Convert an sRGB color (0-255 per channel) to Lab under D65
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` if any channel is not finite, or if a
/// channel is so far out of range that the Lab result would overflow.
///
/// # Example
///
/// ```rust
/// use swatch_match::color::{rgb_to_lab, Rgb};
///
/// let lab = rgb_to_lab(Rgb::new(255.0, 0.0, 0.0))?;
/// assert!((lab.l - 53.24).abs() < 0.1);
/// # Ok::<(), swatch_match::MatchError>(())
/// ```
pub fn rgb_to_lab(rgb: Rgb) -> Result<Lab> {
    rgb.ensure_finite()?;

    let linear = rgb.channels().map(|c| linearize(c / 255.0) * 100.0);

    let [x, y, z] = srgb::TO_XYZ.map(|row| {
        row[0] * linear[0] + row[1] * linear[1] + row[2] * linear[2]
    });

    let [xn, yn, zn] = d65::WHITE_POINT_XYZ;
    let fx = compand(x / xn);
    let fy = compand(y / yn);
    let fz = compand(z / zn);

    let lab = Lab::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz));
    lab.ensure_finite().map_err(|_| {
        MatchError::invalid_input(
            "rgb",
            format!(
                "({}, {}, {}) is too far out of range to convert",
                rgb.r, rgb.g, rgb.b
            ),
        )
    })?;
    Ok(lab)
}

/// Remove the sRGB transfer curve from a normalized channel
fn linearize(c: f64) -> f64 {
    if c > srgb::LINEAR_THRESHOLD {
        ((c + srgb::GAMMA_OFFSET) / srgb::GAMMA_SCALE).powf(srgb::GAMMA)
    } else {
        c / srgb::LINEAR_SLOPE
    }
}

/// CIE nonlinear compression of a white-normalized XYZ component
fn compand(t: f64) -> f64 {
    if t > lab::EPSILON {
        t.powf(1.0 / 3.0)
    } else {
        lab::KAPPA_SLOPE * t + lab::LINEAR_OFFSET
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_lab_near(lab: Lab, expected: (f64, f64, f64), tolerance: f64) {
        assert!(
            (lab.l - expected.0).abs() < tolerance
                && (lab.a - expected.1).abs() < tolerance
                && (lab.b - expected.2).abs() < tolerance,
            "{:?} not within {} of {:?}",
            lab,
            tolerance,
            expected
        );
    }

    #[test]
    fn test_rgb_to_lab_red() {
        let lab = rgb_to_lab(Rgb::new(255.0, 0.0, 0.0)).unwrap();
        assert_lab_near(lab, (53.24, 80.09, 67.20), 0.1);
    }

    #[test]
    fn test_rgb_to_lab_white() {
        let lab = rgb_to_lab(Rgb::new(255.0, 255.0, 255.0)).unwrap();
        assert_lab_near(lab, (100.0, 0.0, 0.0), 0.05);
    }

    #[test]
    fn test_rgb_to_lab_black() {
        let lab = rgb_to_lab(Rgb::new(0.0, 0.0, 0.0)).unwrap();
        assert_lab_near(lab, (0.0, 0.0, 0.0), 1e-12);
    }

    #[test]
    fn test_rgb_to_lab_blue_and_green() {
        let blue = rgb_to_lab(Rgb::new(0.0, 0.0, 255.0)).unwrap();
        assert_lab_near(blue, (32.30, 79.20, -107.86), 0.1);

        let green = rgb_to_lab(Rgb::new(0.0, 255.0, 0.0)).unwrap();
        assert_lab_near(green, (87.74, -86.18, 83.18), 0.1);
    }

    #[test]
    fn test_gray_is_neutral() {
        let lab = rgb_to_lab(Rgb::new(128.0, 128.0, 128.0)).unwrap();
        assert!((lab.l - 53.59).abs() < 0.1);
        assert!(lab.a.abs() < 0.05 && lab.b.abs() < 0.05);
    }

    #[test]
    fn test_linear_segment_near_black() {
        // 10/255 is below the sRGB threshold and must use the linear slope
        let c = 10.0 / 255.0;
        assert!((linearize(c) - c / 12.92).abs() < 1e-15);
        assert!(compand(0.001) > 0.0);
        assert!((compand(0.0) - 16.0 / 116.0).abs() < 1e-15);
    }

    #[test]
    fn test_fractional_and_out_of_range_input_accepted() {
        assert!(rgb_to_lab(Rgb::new(127.5, 64.25, 0.5)).is_ok());
        assert!(rgb_to_lab(Rgb::new(-5.0, 300.0, 128.0)).is_ok());
    }

    #[test]
    fn test_non_finite_input_rejected() {
        let err = rgb_to_lab(Rgb::new(f64::NAN, 0.0, 0.0)).unwrap_err();
        assert!(matches!(err, MatchError::InvalidInput { .. }));
    }

    #[test]
    fn test_overflowing_channel_rejected() {
        // finite, but the transfer curve overflows to infinity
        let err = rgb_to_lab(Rgb::new(1e131, 0.0, 0.0)).unwrap_err();
        assert!(matches!(
            err,
            MatchError::InvalidInput { ref parameter, .. } if parameter == "rgb"
        ));
    }

    #[test]
    fn test_deterministic() {
        let rgb = Rgb::new(12.0, 200.0, 77.0);
        assert_eq!(rgb_to_lab(rgb).unwrap(), rgb_to_lab(rgb).unwrap());
    }
}
