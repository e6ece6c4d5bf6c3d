//! Math primitives for the rtow ray tracer.
//!
//! Everything works in double precision. [`Vec3`] is glam's `DVec3` and is used
//! interchangeably as a point, a direction, or a linear RGB color.

pub use glam::DVec3;

mod interval;
mod ray;
pub mod random;
mod vec3;

pub use interval::Interval;
pub use ray::Ray;
pub use vec3::{degrees_to_radians, unit_vector, MathError, Vec3Ext};

/// 3-component double precision vector.
pub type Vec3 = DVec3;

/// A position in world space.
pub type Point3 = DVec3;

/// Linear RGB color, one channel per component.
pub type Color = DVec3;
