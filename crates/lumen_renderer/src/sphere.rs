//! Sphere primitive for ray tracing.

use std::fmt;
use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material,
};
use lumen_math::{Interval, Ray, Vec3};

/// A sphere primitive.
///
/// The material is shared: any number of spheres may point at the same
/// instance.
#[derive(Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<dyn Material>,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to 0.
    pub fn new(center: Vec3, radius: f32, material: Arc<dyn Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl fmt::Debug for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sphere")
            .field("center", &self.center)
            .field("radius", &self.radius)
            .finish_non_exhaustive()
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // A point has no surface to hit
        if self.radius <= 0.0 {
            return false;
        }

        // |O + tD - C|^2 = r^2, written with h = D.(C - O) in place of b = -2h
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return false;
        }

        // Only the near root is considered. A ray starting inside the sphere
        // has a near root behind its origin and therefore misses.
        let root = (h - discriminant.sqrt()) / a;
        if !ray_t.accepts(root) {
            return false;
        }

        rec.t = root;
        rec.p = ray.at(root);
        let outward_normal = (rec.p - self.center).normalize();
        rec.set_face_normal(ray, outward_normal);
        rec.material = self.material.as_ref();

        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Lambertian;

    fn grey_sphere(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Arc::new(Lambertian::new(Vec3::splat(0.5))))
    }

    fn forward() -> Interval {
        Interval::new(0.001, f32::INFINITY)
    }

    #[test]
    fn test_sphere_hit_head_on() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, forward(), &mut rec));
        assert!((rec.t - 4.0).abs() < 1e-5);
        assert!(rec.t > 0.0);
        assert!(rec.front_face);
        // Normal is anti-parallel to the incoming direction
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -4.0)).length() < 1e-5);
    }

    #[test]
    fn test_sphere_hit_unnormalized_direction() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -2.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, forward(), &mut rec));
        assert!((rec.t - 0.25).abs() < 1e-5);
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_sphere_miss() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        // Passes the center at a perpendicular distance of 2
        let ray = Ray::new(Vec3::new(0.0, 2.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, forward(), &mut rec));
        assert_eq!(rec.t, f32::INFINITY);
    }

    #[test]
    fn test_sphere_behind_ray_is_missed() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, forward(), &mut rec));
    }

    #[test]
    fn test_sphere_tangent_ray_hits() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(sphere.hit(&ray, forward(), &mut rec));
        assert!((rec.t - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_near_root_only_from_inside() {
        // The far root (t = 1) is not tried when the near root (t = -1) fails
        let sphere = grey_sphere(Vec3::ZERO, 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, forward(), &mut rec));
    }

    #[test]
    fn test_sphere_rejects_self_intersection() {
        // Ray leaving the surface outward: roots at t = -1 and t = 0
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::new(0.0, 0.0, -0.5), Vec3::Z);
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, forward(), &mut rec));
    }

    #[test]
    fn test_sphere_respects_far_bound() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();

        assert!(!sphere.hit(&ray, Interval::new(0.001, 3.0), &mut rec));
    }

    #[test]
    fn test_zero_radius_sphere_is_never_hit() {
        let sphere = grey_sphere(Vec3::new(0.0, 0.0, -5.0), -1.0);
        assert_eq!(sphere.radius(), 0.0);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(!sphere.hit(&ray, forward(), &mut rec));
    }
}
