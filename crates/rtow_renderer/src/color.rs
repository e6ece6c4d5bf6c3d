//! Linear color to 8-bit display values.

use rtow_math::{Color, Interval};
use std::io::Write;

/// Displayable intensity range. Kept strictly below 1.0 so that `256 * x`
/// truncates to at most 255.
pub const INTENSITY: Interval = Interval::new(0.000, 0.999);

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f64) -> f64 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Quantize one linear channel to a byte.
#[inline]
fn to_byte(linear: f64) -> u8 {
    (256.0 * INTENSITY.clamp(linear_to_gamma(linear))) as u8
}

/// Convert a linear color to gamma-corrected 8-bit RGB.
pub fn to_rgb8(color: Color) -> [u8; 3] {
    [to_byte(color.x), to_byte(color.y), to_byte(color.z)]
}

/// Write one pixel as an `r g b` line of the plain-text PPM body.
pub fn write_color(out: &mut dyn Write, color: Color) -> std::io::Result<()> {
    let [r, g, b] = to_rgb8(color);
    writeln!(out, "{} {} {}", r, g, b)
}
