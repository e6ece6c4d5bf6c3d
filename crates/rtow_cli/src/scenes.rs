//! Built-in scenes, each with the camera it is meant to be viewed from.

use clap::ValueEnum;
use rand::RngCore;
use rtow_math::random::{random_f64, random_f64_range, random_vec3, random_vec3_range};
use rtow_renderer::{
    Camera, Color, Dielectric, HittableList, Lambertian, Material, Metal, Point3, Sphere, Vec3,
};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScenePreset {
    /// A diffuse sphere resting on a large ground sphere
    Ground,
    /// Diffuse, hollow glass and fuzzy metal spheres side by side
    Materials,
    /// Two touching spheres seen through a 90 degree lens
    WideAngle,
    /// Field of small random spheres around three large ones, with depth of field
    Cover,
}

/// A world and its camera preset.
pub struct Scene {
    pub world: HittableList,
    pub camera: Camera,
}

impl ScenePreset {
    /// Build the scene. Only `Cover` draws from `rng`.
    pub fn build(self, rng: &mut dyn RngCore) -> Scene {
        match self {
            ScenePreset::Ground => ground(),
            ScenePreset::Materials => materials(),
            ScenePreset::WideAngle => wide_angle(),
            ScenePreset::Cover => cover(rng),
        }
    }
}

fn lambertian(albedo: Color) -> Arc<dyn Material> {
    Arc::new(Lambertian::new(albedo))
}

fn sphere(center: Point3, radius: f64, material: Arc<dyn Material>) -> Box<Sphere> {
    Box::new(Sphere::new(center, radius, material))
}

/// 16:9, 400 pixels wide, looking down -Z from the origin.
fn preview_camera() -> Camera {
    Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Point3::ZERO, Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 10.0)
}

fn ground() -> Scene {
    let gray = lambertian(Color::splat(0.5));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, 0.0, -1.0), 0.5, gray.clone()));
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, gray));

    Scene {
        world,
        camera: preview_camera(),
    }
}

fn materials() -> Scene {
    let material_ground = lambertian(Color::new(0.8, 0.8, 0.0));
    let material_center = lambertian(Color::new(0.1, 0.2, 0.5));
    let material_left: Arc<dyn Material> = Arc::new(Dielectric::new(1.5));
    // Air inside glass
    let material_bubble: Arc<dyn Material> = Arc::new(Dielectric::new(1.0 / 1.5));
    let material_right: Arc<dyn Material> = Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(0.0, -100.5, -1.0), 100.0, material_ground));
    world.add(sphere(Point3::new(0.0, 0.0, -1.2), 0.5, material_center));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.5, material_left));
    world.add(sphere(Point3::new(-1.0, 0.0, -1.0), 0.4, material_bubble));
    world.add(sphere(Point3::new(1.0, 0.0, -1.0), 0.5, material_right));

    Scene {
        world,
        camera: preview_camera(),
    }
}

fn wide_angle() -> Scene {
    let r = (std::f64::consts::PI / 4.0).cos();

    let mut world = HittableList::new();
    world.add(sphere(Point3::new(-r, 0.0, -1.0), r, lambertian(Color::new(0.0, 0.0, 1.0))));
    world.add(sphere(Point3::new(r, 0.0, -1.0), r, lambertian(Color::new(1.0, 0.0, 0.0))));

    Scene {
        world,
        camera: preview_camera(),
    }
}

fn cover(rng: &mut dyn RngCore) -> Scene {
    let mut world = HittableList::new();

    world.add(sphere(
        Point3::new(0.0, -1000.0, 0.0),
        1000.0,
        lambertian(Color::splat(0.5)),
    ));

    let keep_clear = Point3::new(4.0, 0.2, 0.0);
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(rng);
            let center = Point3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            if (center - keep_clear).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                let albedo = random_vec3(rng) * random_vec3(rng);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random_vec3_range(rng, 0.5, 1.0);
                let fuzz = random_f64_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                Arc::new(Dielectric::new(1.5))
            };
            world.add(sphere(center, 0.2, material));
        }
    }

    world.add(sphere(Point3::new(0.0, 1.0, 0.0), 1.0, Arc::new(Dielectric::new(1.5))));
    world.add(sphere(
        Point3::new(-4.0, 1.0, 0.0),
        1.0,
        lambertian(Color::new(0.4, 0.2, 0.1)),
    ));
    world.add(sphere(
        Point3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    ));

    let camera = Camera::new()
        .with_resolution(1200, 16.0 / 9.0)
        .with_quality(100, 50)
        .with_position(Point3::new(13.0, 2.0, 3.0), Point3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    log::debug!("Cover scene built with {} spheres", world.len());
    Scene { world, camera }
}
