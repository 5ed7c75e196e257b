//! Color representation, conversion and difference
//!
//! This module holds the value types, the sRGB to Lab conversion,
//! the CIE76 distance and the hex codec.

pub mod model;
pub mod conversion;
pub mod distance;
pub mod hex;

pub use model::{Lab, Rgb};
pub use conversion::rgb_to_lab;
pub use distance::delta_e76;
pub use hex::{from_hex, to_hex};
