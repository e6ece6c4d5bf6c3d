//! Vector helpers on top of glam's `DVec3`.

use crate::Vec3;
use thiserror::Error;

/// Components smaller than this in magnitude count as zero.
const NEAR_ZERO_EPSILON: f64 = 1e-8;

/// Errors raised by vector operations that are undefined for some inputs.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("cannot normalize zero-length vector {0}")]
    ZeroLengthVector(Vec3),
}

/// Extra operations the ray tracer needs on [`Vec3`].
pub trait Vec3Ext {
    /// True if every component is within `1e-8` of zero.
    fn near_zero(&self) -> bool;

    /// Unit vector in the same direction, or an error for a zero-length input.
    fn unit(&self) -> Result<Vec3, MathError>;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        self.abs().max_element() < NEAR_ZERO_EPSILON
    }

    #[inline]
    fn unit(&self) -> Result<Vec3, MathError> {
        unit_vector(*self)
    }
}

/// Divide `v` by its length.
///
/// Fails instead of producing NaN/infinity when the length is zero or not finite.
pub fn unit_vector(v: Vec3) -> Result<Vec3, MathError> {
    let length = v.length();
    if length == 0.0 || !length.is_finite() {
        return Err(MathError::ZeroLengthVector(v));
    }
    Ok(v / length)
}

/// Convert an angle in degrees to radians.
#[inline]
pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
