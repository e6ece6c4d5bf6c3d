//! Camera for ray generation.

use crate::error::{RenderError, RenderResult};
use rand::RngCore;
use rtow_math::random::{random_f64, random_in_unit_disk};
use rtow_math::{degrees_to_radians, unit_vector, Point3, Ray, Vec3};
use serde::{Deserialize, Serialize};

/// Thin-lens camera.
///
/// The public fields are the configuration. Everything else is derived by
/// [`Camera::initialize`] and stays constant for the whole render. The
/// configuration can also be read from JSON, where vectors are `[x, y, z]`
/// arrays and missing fields keep their defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Camera {
    // Image settings
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixels
    pub image_width: u32,
    /// Number of random samples averaged per pixel
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces into the scene
    pub max_depth: u32,

    // Camera positioning
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point the camera is looking from
    pub lookfrom: Point3,
    /// Point the camera is looking at
    pub lookat: Point3,
    /// Camera-relative "up" direction
    pub vup: Vec3,

    // Lens settings
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from `lookfrom` to the plane of perfect focus
    pub focus_dist: f64,

    // Cached computed values (set by initialize())
    #[serde(skip)]
    image_height: u32,
    #[serde(skip)]
    samples_scale: f64,
    #[serde(skip)]
    center: Point3,
    #[serde(skip)]
    pixel00_loc: Point3,
    #[serde(skip)]
    pixel_delta_u: Vec3,
    #[serde(skip)]
    pixel_delta_v: Vec3,
    #[serde(skip)]
    u: Vec3,
    #[serde(skip)]
    v: Vec3,
    #[serde(skip)]
    w: Vec3,
    #[serde(skip)]
    defocus_disk_u: Vec3,
    #[serde(skip)]
    defocus_disk_v: Vec3,
}

impl Camera {
    /// Create a new camera with default settings.
    pub fn new() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: Point3::new(0.0, 0.0, 0.0),
            lookat: Point3::new(0.0, 0.0, -1.0),
            vup: Vec3::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            // Cached values (initialized to defaults)
            image_height: 100,
            samples_scale: 0.1,
            center: Point3::ZERO,
            pixel00_loc: Point3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            u: Vec3::X,
            v: Vec3::Y,
            w: Vec3::Z,
            defocus_disk_u: Vec3::ZERO,
            defocus_disk_v: Vec3::ZERO,
        }
    }

    /// Set image width and aspect ratio; the height is derived.
    pub fn with_resolution(mut self, image_width: u32, aspect_ratio: f64) -> Self {
        self.image_width = image_width;
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples_per_pixel: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples_per_pixel;
        self.max_depth = max_depth;
        self
    }

    /// Set camera position.
    pub fn with_position(mut self, lookfrom: Point3, lookat: Point3, vup: Vec3) -> Self {
        self.lookfrom = lookfrom;
        self.lookat = lookat;
        self.vup = vup;
        self
    }

    /// Set lens settings.
    pub fn with_lens(mut self, vfov: f64, defocus_angle: f64, focus_dist: f64) -> Self {
        self.vfov = vfov;
        self.defocus_angle = defocus_angle;
        self.focus_dist = focus_dist;
        self
    }

    /// Derive the viewport geometry from the configuration.
    ///
    /// Must be called before generating rays. Rejects configurations that
    /// cannot produce an image, and framings whose basis would need a
    /// zero-length vector normalized (`lookfrom == lookat`, or `vup` parallel
    /// to the view direction).
    pub fn initialize(&mut self) -> RenderResult<()> {
        if self.image_width == 0 {
            return Err(RenderError::Configuration(
                "image_width must be at least 1 pixel".to_string(),
            ));
        }
        if !(self.aspect_ratio.is_finite() && self.aspect_ratio > 0.0) {
            return Err(RenderError::Configuration(format!(
                "aspect_ratio must be positive, got {}",
                self.aspect_ratio
            )));
        }
        if self.samples_per_pixel == 0 {
            return Err(RenderError::Configuration(
                "samples_per_pixel must be at least 1".to_string(),
            ));
        }

        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f64;
        self.center = self.lookfrom;

        // Calculate viewport dimensions
        let theta = degrees_to_radians(self.vfov);
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Calculate camera basis vectors
        self.w = unit_vector(self.lookfrom - self.lookat)?;
        self.u = unit_vector(self.vup.cross(self.w))?;
        self.v = self.w.cross(self.u);

        // Viewport edges; v runs down the image
        let viewport_u = viewport_width * self.u;
        let viewport_v = -viewport_height * self.v;

        // Calculate pixel delta vectors
        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        // Calculate upper left pixel location
        let viewport_upper_left =
            self.center - self.focus_dist * self.w - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate defocus disk basis vectors
        let defocus_radius = self.focus_dist * degrees_to_radians(self.defocus_angle / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        log::debug!(
            "Camera initialized: {}x{}, viewport {:.3}x{:.3}, pixel00 {}, defocus radius {:.4}",
            self.image_width,
            self.image_height,
            viewport_width,
            viewport_height,
            self.pixel00_loc,
            defocus_radius
        );

        Ok(())
    }

    /// Generate a ray for pixel (i, j) with random sampling.
    ///
    /// The sample point is jittered inside the pixel, and the origin is drawn
    /// from the defocus disk when `defocus_angle > 0`. The direction is left
    /// unnormalized.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);

        let pixel_sample = self.pixel00_loc
            + ((i as f64) + offset.x) * self.pixel_delta_u
            + ((j as f64) + offset.y) * self.pixel_delta_v;

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };

        Ray::new(ray_origin, pixel_sample - ray_origin)
    }

    /// Sample a point on the defocus disk.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Point3 {
        let p = random_in_unit_disk(rng);
        self.center + p.x * self.defocus_disk_u + p.y * self.defocus_disk_v
    }

    /// Image height derived by [`Camera::initialize`].
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }

    /// Camera center; equal to `lookfrom` once initialized.
    pub fn center(&self) -> Point3 {
        self.center
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample a random point in the unit square [-0.5, 0.5) x [-0.5, 0.5).
fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(random_f64(rng) - 0.5, random_f64(rng) - 0.5, 0.0)
}
