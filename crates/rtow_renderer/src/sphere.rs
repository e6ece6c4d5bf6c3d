//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use rtow_math::{Interval, Point3, Ray};
use std::sync::Arc;

/// A sphere primitive.
///
/// The material is shared: any number of spheres may point at the same instance.
#[derive(Clone)]
pub struct Sphere {
    center: Point3,
    radius: f64,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero.
    pub fn new(center: Point3, radius: f64, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Point3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root strictly inside the window; endpoints count as misses
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (ray.at(root) - self.center) / self.radius;
        Some(HitRecord::new(ray, root, outward_normal, self.material.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;
    use crate::{Color, Vec3};

    fn unit_sphere_at(center: Point3, radius: f64) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Color::splat(0.5))))
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -1.0), 0.5);

        // Ray pointing away from sphere
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 1.0, 0.0));
        assert!(sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).is_none());
    }

    #[test]
    fn test_hit_window_is_open() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -3.0), 1.0);
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        // Near root at t = 2, far root at t = 4
        let t_star = 2.0;

        for (min, max) in [(0.0, 2.5), (1.999, 2.001), (-10.0, f64::INFINITY)] {
            let rec = sphere.hit(&ray, Interval::new(min, max)).unwrap();
            assert!((rec.t - t_star).abs() < 1e-12, "window ({min}, {max})");
        }

        // Upper bound at or below t* excludes both roots
        assert!(sphere.hit(&ray, Interval::new(0.0, 2.0)).is_none());
        assert!(sphere.hit(&ray, Interval::new(0.0, 1.5)).is_none());

        // Lower bound at t* rejects the near root, the far root is still inside
        let rec = sphere.hit(&ray, Interval::new(2.0, 10.0)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-12);
        assert!(!rec.front_face);

        // Lower bound at the far root leaves nothing
        assert!(sphere.hit(&ray, Interval::new(4.0, 10.0)).is_none());
    }

    #[test]
    fn test_origin_at_center() {
        let center = Point3::new(1.0, -2.0, 3.0);
        let sphere = unit_sphere_at(center, 2.0);

        for direction in [
            Vec3::new(0.0, 0.0, -1.0),
            Vec3::new(3.0, 4.0, 0.0),
            Vec3::new(-0.1, 0.2, 0.05),
        ] {
            let ray = Ray::new(center, direction);
            let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

            let expected = 2.0 / direction.length();
            assert!((rec.t - expected).abs() < 1e-9, "t = {} for {direction}", rec.t);
            // From inside, the stored normal faces back toward the center
            assert!(!rec.front_face);
            assert!(rec.normal.dot(direction) < 0.0);
        }
    }

    #[test]
    fn test_normal_is_unit_length() {
        let sphere = unit_sphere_at(Point3::new(0.0, 0.0, -4.0), 1.5);
        let ray = Ray::new(Point3::ZERO, Vec3::new(0.2, -0.1, -1.0));
        let rec = sphere.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();

        assert!((rec.normal.length() - 1.0).abs() < 1e-9);
        assert!(rec.normal.dot(ray.direction()) < 0.0);
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = unit_sphere_at(Point3::ZERO, -1.0);
        assert_eq!(sphere.radius(), 0.0);
        assert_eq!(sphere.center(), Point3::ZERO);
    }
}
