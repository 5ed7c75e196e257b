//! Colorimetric constants and reference values for color comparison
//!
//! This module contains compile-time constants for the sRGB to CIE Lab
//! conversion and the default classification thresholds.

/// D65 Standard Illuminant Reference
///
/// CIE Standard Illuminant D65 represents average daylight with a correlated
/// color temperature of 6504K. This is the standard reference for digital
/// images and computer displays.
pub mod d65 {
    /// D65 white point in CIE XYZ, scaled so that Y = 100
    pub const WHITE_POINT_XYZ: [f64; 3] = [95.047, 100.000, 108.883];
}

/// sRGB transfer function and primaries
pub mod srgb {
    /// Encoded values above this use the power segment of the sRGB curve
    pub const LINEAR_THRESHOLD: f64 = 0.04045;

    /// Slope of the linear segment near black
    pub const LINEAR_SLOPE: f64 = 12.92;

    /// Offset of the power segment
    pub const GAMMA_OFFSET: f64 = 0.055;

    /// Divisor of the power segment
    pub const GAMMA_SCALE: f64 = 1.055;

    /// Exponent of the power segment
    pub const GAMMA: f64 = 2.4;

    /// Linear sRGB (scaled to 0-100) to XYZ under D65, row-major
    pub const TO_XYZ: [[f64; 3]; 3] = [
        [0.4124, 0.3576, 0.1805],
        [0.2126, 0.7152, 0.0722],
        [0.0193, 0.1192, 0.9505],
    ];
}

/// CIE L*a*b* companding constants
pub mod lab {
    /// Normalized XYZ components above this use the cube root
    pub const EPSILON: f64 = 0.008856;

    /// Slope of the linear segment below `EPSILON`
    pub const KAPPA_SLOPE: f64 = 7.787;

    /// Offset of the linear segment
    pub const LINEAR_OFFSET: f64 = 16.0 / 116.0;
}

/// Separation label thresholds (percent)
///
/// Tuned against CIE76; switching metric requires re-deriving them.
pub mod separation {
    /// Lower bound of the "Weak" band
    pub const WEAK: f64 = 5.0;

    /// Lower bound of the "Moderate" band
    pub const MODERATE: f64 = 15.0;

    /// Lower bound of the "Strong" band
    pub const STRONG: f64 = 30.0;
}

/// Interactive selection limits
pub mod selection {
    /// Smallest accepted selection width in pixels
    pub const MIN_WIDTH: u32 = 2;

    /// Smallest accepted selection height in pixels
    pub const MIN_HEIGHT: u32 = 2;
}

/// Tolerance used when checking that the two percentages sum to 100
pub const PERCENT_SUM_EPSILON: f64 = 1e-9;
