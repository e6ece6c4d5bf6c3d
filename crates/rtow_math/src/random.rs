//! Random sampling helpers.
//!
//! Every function takes the generator explicitly so a render can be replayed
//! from a fixed seed.

use crate::Vec3;
use rand::{Rng, RngCore};

/// Uniform `f64` in `[0, 1)`.
#[inline]
pub fn random_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen()
}

/// Uniform `f64` in `[min, max)`.
#[inline]
pub fn random_f64_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Vector with each component uniform in `[0, 1)`.
pub fn random_vec3(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
}

/// Vector with each component uniform in `[min, max)`.
pub fn random_vec3_range(rng: &mut dyn RngCore, min: f64, max: f64) -> Vec3 {
    Vec3::new(
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
    )
}

/// Unit vector uniformly distributed on the unit sphere.
///
/// Rejection-samples the cube `[-1, 1)^3` until a point falls inside the unit
/// ball, then projects it onto the surface.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = random_vec3_range(rng, -1.0, 1.0);
        let len_sq = p.length_squared();
        // Tiny vectors would blow up to infinity when normalized.
        if 1e-160 < len_sq && len_sq <= 1.0 {
            return p / len_sq.sqrt();
        }
    }
}

/// Random point strictly inside the unit disk in the z = 0 plane.
pub fn random_in_unit_disk(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}
