//! Simple path tracer example.
//!
//! Renders three spheres on a ground plane and saves to PPM format.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rtow_renderer::{
    render, write_ppm, Camera, Color, Dielectric, HittableList, Lambertian, Metal, Point3,
    RenderResult, Sphere, Vec3,
};
use std::fs::File;
use std::io::BufWriter;
use std::sync::Arc;

fn main() -> RenderResult<()> {
    env_logger::init();

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, -100.5, -1.0),
        100.0,
        Arc::new(Lambertian::new(Color::new(0.8, 0.8, 0.0))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(-1.0, 0.0, -1.0),
        0.5,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(0.0, 0.0, -1.2),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.1, 0.2, 0.5))),
    )));
    world.add(Box::new(Sphere::new(
        Point3::new(1.0, 0.0, -1.0),
        0.5,
        Arc::new(Metal::new(Color::new(0.8, 0.6, 0.2), 0.1)),
    )));

    let mut camera = Camera::new()
        .with_resolution(400, 16.0 / 9.0)
        .with_quality(32, 10)
        .with_position(Point3::new(-2.0, 2.0, 1.0), Point3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(20.0, 0.0, 3.4);

    let mut rng = StdRng::seed_from_u64(2024);
    let image = render(&mut camera, &world, &mut std::io::stderr(), &mut rng)?;

    let mut out = BufWriter::new(File::create("simple_render.ppm")?);
    write_ppm(&image, &mut out)?;
    println!("Saved simple_render.ppm ({}x{})", image.width, image.height);

    Ok(())
}
