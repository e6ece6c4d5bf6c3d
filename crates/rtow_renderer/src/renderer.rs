//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Recursive ray tracing with a bounce budget
//! - Anti-aliasing via jittered multi-sampling
//! - A white-to-blue sky gradient as the only light source

use crate::color::write_color;
use crate::error::RenderResult;
use crate::output::ImageBuffer;
use crate::{Camera, Hittable};
use rand::RngCore;
use rtow_math::{Color, Interval, Ray};
use std::io::Write;
use std::time::Instant;

/// Lower bound of the hit window for every traced ray.
///
/// Scattered rays start exactly on a surface; floating point error would
/// otherwise let them hit that same surface at t ≈ 0.
pub const T_MIN: f64 = 0.001;

/// Compute the color seen by a ray.
///
/// Returns black once `depth` reaches zero. Otherwise the hit material either
/// scatters the ray, and the recursive result is tinted by the attenuation, or
/// absorbs it. Rays that escape the scene see the sky.
pub fn ray_color(ray: &Ray, depth: u32, world: &dyn Hittable, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded the bounce budget, no more light is gathered
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::new(T_MIN, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(result) => result.attenuation * ray_color(&result.scattered, depth - 1, world, rng),
        None => Color::ZERO,
    }
}

/// Blend from white at the bottom to light blue at the top, by direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize_or_zero();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    (1.0 - a) * white + a * blue
}

/// Render a single pixel with multi-sampling.
///
/// Returns the average linear color of `samples_per_pixel` sample rays.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    i: u32,
    j: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel {
        let ray = camera.get_ray(i, j, rng);
        pixel_color += ray_color(&ray, camera.max_depth, world, rng);
    }

    camera.samples_scale() * pixel_color
}

/// Walk every pixel in row-major order, top row first, reporting progress per scanline.
fn trace_rows(
    camera: &Camera,
    world: &dyn Hittable,
    progress: &mut dyn Write,
    rng: &mut dyn RngCore,
    mut emit: impl FnMut(u32, u32, Color) -> RenderResult<()>,
) -> RenderResult<()> {
    let height = camera.image_height();
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        camera.image_width,
        height,
        camera.samples_per_pixel,
        camera.max_depth
    );
    let start = Instant::now();

    for j in 0..height {
        write!(progress, "\rScanlines remaining: {} ", height - j)?;
        progress.flush()?;
        for i in 0..camera.image_width {
            emit(i, j, render_pixel(camera, world, i, j, rng))?;
        }
    }

    write!(progress, "\rDone.                 \n")?;
    progress.flush()?;
    log::info!("Rendered in {:.2?}", start.elapsed());
    Ok(())
}

/// Render the scene as a plain-text PPM.
///
/// Initializes the camera first, so an invalid configuration fails before
/// anything is written to `out`. Progress goes to `progress`.
pub fn render_ppm(
    camera: &mut Camera,
    world: &dyn Hittable,
    out: &mut dyn Write,
    progress: &mut dyn Write,
    rng: &mut dyn RngCore,
) -> RenderResult<()> {
    camera.initialize()?;

    writeln!(out, "P3\n{} {}\n255", camera.image_width, camera.image_height())?;
    trace_rows(camera, world, progress, rng, |_, _, color| {
        write_color(out, color)?;
        Ok(())
    })?;
    out.flush()?;
    Ok(())
}

/// Render the entire scene to an image buffer.
pub fn render(
    camera: &mut Camera,
    world: &dyn Hittable,
    progress: &mut dyn Write,
    rng: &mut dyn RngCore,
) -> RenderResult<ImageBuffer> {
    camera.initialize()?;

    let mut image = ImageBuffer::new(camera.image_width, camera.image_height());
    trace_rows(camera, world, progress, rng, |i, j, color| {
        image.set(i, j, color);
        Ok(())
    })?;

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::write_ppm;
    use crate::{Dielectric, HitRecord, HittableList, Lambertian, Material, Metal, ScatterResult, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use rtow_math::{Point3, Vec3};
    use std::sync::Arc;

    fn diffuse(r: f64, g: f64, b: f64) -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Color::new(r, g, b)))
    }

    fn small_camera(width: u32, spp: u32, depth: u32) -> Camera {
        Camera::new()
            .with_resolution(width, 16.0 / 9.0)
            .with_quality(spp, depth)
            .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
            .with_lens(90.0, 0.0, 1.0)
    }

    fn assert_close(a: Color, b: Color) {
        assert!((a - b).length() < 1e-12, "{a} != {b}");
    }

    #[test]
    fn test_sky_gradient() {
        let up = sky_gradient(&Ray::new(Point3::ZERO, Vec3::new(0.0, 3.0, 0.0)));
        assert_close(up, Color::new(0.5, 0.7, 1.0));

        let down = sky_gradient(&Ray::new(Point3::ZERO, Vec3::new(0.0, -0.2, 0.0)));
        assert_close(down, Color::ONE);

        let level = sky_gradient(&Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0)));
        assert_close(level, Color::new(0.75, 0.85, 1.0));
    }

    #[test]
    fn test_zero_depth_is_black() {
        let world = HittableList::new();
        let ray = Ray::new(Point3::ZERO, Vec3::Y);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(ray_color(&ray, 0, &world, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_miss_returns_sky() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, diffuse(0.5, 0.5, 0.5))));
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        let mut rng = StdRng::seed_from_u64(2);

        assert_eq!(ray_color(&ray, 5, &world, &mut rng), sky_gradient(&ray));
    }

    #[test]
    fn test_single_bounce_budget_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, diffuse(0.5, 0.5, 0.5))));
        let mut rng = StdRng::seed_from_u64(3);

        for dir in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(0.1, 0.1, -1.0),
            Vec3::new(-0.3, 0.2, -1.0),
        ] {
            let ray = Ray::new(Point3::ZERO, dir);
            assert_eq!(ray_color(&ray, 1, &world, &mut rng), Color::ZERO);
        }
    }

    #[test]
    fn test_absorbed_ray_is_black() {
        struct Absorber;
        impl Material for Absorber {
            fn scatter(&self, _: &Ray, _: &HitRecord, _: &mut dyn RngCore) -> Option<ScatterResult> {
                None
            }
        }

        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, Arc::new(Absorber))));
        let mut rng = StdRng::seed_from_u64(4);

        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(ray_color(&ray, 50, &world, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_closed_mirror_exhausts_budget() {
        let mut world = HittableList::new();
        let metal: Arc<dyn Material> = Arc::new(Metal::new(Color::ONE, 0.0));
        world.add(Box::new(Sphere::new(Point3::ZERO, 1.0, metal)));
        let mut rng = StdRng::seed_from_u64(4);

        // Inside a perfect mirror the ray bounces back and forth until depth runs out
        let ray = Ray::new(Point3::ZERO, Vec3::X);
        assert_eq!(ray_color(&ray, 10, &world, &mut rng), Color::ZERO);
    }

    #[test]
    fn test_glass_sphere_lets_sky_through() {
        let mut world = HittableList::new();
        let glass: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -2.0), 0.5, glass)));
        let mut rng = StdRng::seed_from_u64(5);

        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let color = ray_color(&ray, 50, &world, &mut rng);
        // Unattenuated: whatever leaves the glass sees the sky
        assert!(color.min_element() >= 0.5 - 1e-12);
        assert!(color.max_element() <= 1.0 + 1e-12);
        assert!((color.z - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_world_matches_sky_per_pixel() {
        let world = HittableList::new();
        let mut camera = small_camera(32, 1, 4);
        let image = render(&mut camera, &world, &mut std::io::sink(), &mut StdRng::seed_from_u64(9))
            .unwrap();
        assert_eq!((image.width, image.height), (32, 18));

        // Replay the same sample rays; an empty world consumes no extra randomness
        let mut replay = StdRng::seed_from_u64(9);
        for j in 0..image.height {
            for i in 0..image.width {
                let ray = camera.get_ray(i, j, &mut replay);
                assert_close(image.get(i, j), sky_gradient(&ray));
            }
        }
    }

    #[test]
    fn test_empty_world_stays_within_gradient() {
        let world = HittableList::new();
        let mut camera = small_camera(16, 8, 2);
        let image =
            render(&mut camera, &world, &mut std::io::sink(), &mut StdRng::seed_from_u64(10))
                .unwrap();

        for color in &image.pixels {
            assert!(color.x >= 0.5 - 1e-12 && color.x <= 1.0 + 1e-12);
            assert!(color.y >= 0.7 - 1e-12 && color.y <= 1.0 + 1e-12);
            assert!((color.z - 1.0).abs() < 1e-12);
        }
        // Top rows look further up, so they are bluer
        assert!(image.get(8, 0).x < image.get(8, image.height - 1).x);
    }

    #[test]
    fn test_diffuse_sphere_depth_one_is_black() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, diffuse(0.5, 0.5, 0.5))));
        let mut camera = small_camera(40, 1, 1);
        let image =
            render(&mut camera, &world, &mut std::io::sink(), &mut StdRng::seed_from_u64(11))
                .unwrap();

        // Centre of the image looks straight at the sphere
        assert_eq!(image.get(20, image.height / 2), Color::ZERO);
        // Corners see past it
        assert_ne!(image.get(0, 0), Color::ZERO);
        assert_ne!(image.get(39, image.height - 1), Color::ZERO);
    }

    #[test]
    fn test_render_ppm_format() {
        let world = HittableList::new();
        let mut camera = small_camera(8, 2, 3);
        let mut out = Vec::new();
        let mut progress = Vec::new();

        render_ppm(&mut camera, &world, &mut out, &mut progress, &mut StdRng::seed_from_u64(13))
            .unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("P3"));
        assert_eq!(lines.next(), Some("8 4"));
        assert_eq!(lines.next(), Some("255"));
        let pixels: Vec<&str> = lines.collect();
        assert_eq!(pixels.len(), 32);
        for line in pixels {
            let channels: Vec<u32> = line.split(' ').map(|c| c.parse().unwrap()).collect();
            assert_eq!(channels.len(), 3);
            assert!(channels.iter().all(|&c| c <= 255));
        }

        let progress = String::from_utf8(progress).unwrap();
        assert!(progress.starts_with("\rScanlines remaining: 4 "));
        assert!(progress.contains("\rScanlines remaining: 1 "));
        assert!(progress.ends_with("\rDone.                 \n"));
    }

    #[test]
    fn test_invalid_camera_writes_nothing() {
        let world = HittableList::new();
        let mut camera = small_camera(0, 1, 1);
        let mut out = Vec::new();

        let result = render_ppm(
            &mut camera,
            &world,
            &mut out,
            &mut std::io::sink(),
            &mut StdRng::seed_from_u64(14),
        );
        assert!(result.is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_same_seed_same_bytes() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, -100.5, -1.0), 100.0, diffuse(0.8, 0.8, 0.0))));
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.2), 0.5, diffuse(0.1, 0.2, 0.5))));
        world.add(Box::new(Sphere::new(Point3::new(-1.0, 0.0, -1.0), 0.5, Arc::new(Dielectric::new(1.5)))));
        world.add(Box::new(Sphere::new(Point3::new(1.0, 0.0, -1.0), 0.5, Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0)))));

        let render_once = || {
            let mut camera = small_camera(24, 1, 10);
            let mut out = Vec::new();
            render_ppm(
                &mut camera,
                &world,
                &mut out,
                &mut std::io::sink(),
                &mut StdRng::seed_from_u64(2024),
            )
            .unwrap();
            out
        };

        let first = render_once();
        let second = render_once();
        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_streamed_ppm_matches_buffered_render() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Point3::new(0.0, 0.0, -1.0), 0.5, diffuse(0.5, 0.5, 0.5))));

        let mut streamed = Vec::new();
        render_ppm(
            &mut small_camera(16, 2, 5),
            &world,
            &mut streamed,
            &mut std::io::sink(),
            &mut StdRng::seed_from_u64(77),
        )
        .unwrap();

        let image = render(
            &mut small_camera(16, 2, 5),
            &world,
            &mut std::io::sink(),
            &mut StdRng::seed_from_u64(77),
        )
        .unwrap();
        let mut buffered = Vec::new();
        write_ppm(&image, &mut buffered).unwrap();

        assert_eq!(streamed, buffered);
    }
}
