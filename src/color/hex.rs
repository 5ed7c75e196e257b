//! Hexadecimal color representation
//!
//! Canonical form is `#rrggbb`, lowercase, zero-padded.

use crate::{MatchError, Result};

use super::model::Rgb;

/// Convert an RGB color to its canonical hex string
///
/// Channels are clamped to [0, 255] before rounding, so out-of-range
/// statistics still produce two digits per channel. NaN encodes as `00`.
pub fn to_hex(rgb: Rgb) -> String {
    let [r, g, b] = rgb.channels().map(channel_byte);
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

fn channel_byte(value: f64) -> u8 {
    // `as` saturates and maps NaN to 0
    value.clamp(0.0, 255.0).round() as u8
}

/// Parse a hex color string (`#rrggbb` or `rrggbb`, any case)
///
/// # Errors
///
/// Returns `MatchError::InvalidInput` if the string is not six hex digits.
pub fn from_hex(hex: &str) -> Result<Rgb> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return Err(MatchError::invalid_input(
            "hex",
            format!("expected 6 hex digits, got {:?}", hex),
        ));
    }

    let parse = |range: std::ops::Range<usize>, channel: &str| {
        u8::from_str_radix(&digits[range], 16).map_err(|e| {
            MatchError::invalid_input(format!("hex.{}", channel), e.to_string())
        })
    };

    let r = parse(0..2, "r")?;
    let g = parse(2..4, "g")?;
    let b = parse(4..6, "b")?;
    Ok(Rgb::from([r, g, b]))
}
