//! rtow renderer - CPU Monte Carlo path tracing.
//!
//! Casts jittered rays from a thin-lens camera into a scene of spheres,
//! follows their bounces off diffuse, metal and glass surfaces, and averages
//! the radiance into 8-bit pixels. Rendering is single threaded and every
//! random decision comes from a caller-supplied generator, so a fixed seed
//! reproduces the same image byte for byte.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use rand::{rngs::StdRng, SeedableRng};
//! use rtow_renderer::{render_ppm, Camera, HittableList, Lambertian, Point3, Sphere, Color};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut world = HittableList::new();
//! let gray = Arc::new(Lambertian::new(Color::splat(0.5)));
//! world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, gray)));
//!
//! let mut camera = Camera::new().with_resolution(64, 16.0 / 9.0);
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut ppm = Vec::new();
//! render_ppm(&mut camera, &world, &mut ppm, &mut std::io::sink(), &mut rng)?;
//! assert!(ppm.starts_with(b"P3\n64 36\n255\n"));
//! # Ok(())
//! # }
//! ```

mod camera;
mod color;
mod error;
mod hittable;
mod material;
mod output;
mod renderer;
mod sphere;

pub use camera::Camera;
pub use color::{linear_to_gamma, to_rgb8, write_color, INTENSITY};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use material::{
    reflect, reflectance, refract, Dielectric, Lambertian, Material, Metal, ScatterResult,
};
pub use output::{save_png, write_ppm, ImageBuffer};
pub use renderer::{ray_color, render, render_pixel, render_ppm, sky_gradient, T_MIN};
pub use sphere::Sphere;

/// Re-export the math types from rtow_math
pub use rtow_math::{Color, Interval, Point3, Ray, Vec3};
