//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{HitRecord, Hittable},
    Material, SceneError,
};
use lumen_math::{safe_normalize, Interval, Ray, Vec3};

/// Squared direction lengths below this make the quadratic degenerate.
const MIN_DIRECTION_LENGTH_SQUARED: f32 = 1e-12;

/// A sphere primitive.
#[derive(Debug, Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere. The radius must be positive and finite.
    pub fn new(center: Vec3, radius: f32, material: Arc<Material>) -> Result<Self, SceneError> {
        if !center.is_finite() {
            return Err(SceneError::NonFiniteCenter(center));
        }
        if !(radius > 0.0) || !radius.is_finite() {
            return Err(SceneError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            material,
        })
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn material(&self) -> &Arc<Material> {
        &self.material
    }
}

impl Hittable for Sphere {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'a>> {
        let a = ray.direction.length_squared();
        if a < MIN_DIRECTION_LENGTH_SQUARED {
            return None;
        }

        let oc = self.center - ray.origin;
        let h = ray.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = safe_normalize((ray.at(root) - self.center) / self.radius)?;
        Some(HitRecord::new(ray, root, outward_normal, &self.material))
    }

    fn translate(&mut self, offset: Vec3) {
        self.center += offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_sphere_at(center: Vec3, radius: f32) -> Sphere {
        Sphere::new(center, radius, Arc::new(Material::default())).unwrap()
    }

    #[test]
    fn test_sphere_hit() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 0.5).abs() < 1e-5);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-5);
        assert!((rec.normal - Vec3::Z).length() < 1e-5);
        assert!(rec.front_face);
    }

    #[test]
    fn test_hit_distance_toward_center() {
        let center = Vec3::new(3.0, -2.0, -7.0);
        let radius = 1.25;
        let sphere = unit_sphere_at(center, radius);
        let origin = Vec3::new(0.5, 1.0, 2.0);
        let ray = Ray::new(origin, (center - origin).normalize());

        let rec = sphere.hit(&ray, Interval::from_min(0.0)).unwrap();
        let expected = origin.distance(center) - radius;
        assert!((rec.t - expected).abs() < 1e-4);
    }

    #[test]
    fn test_sphere_miss_pointing_away() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);

        for direction in [Vec3::Y, Vec3::Z, Vec3::new(0.3, 0.2, 1.0).normalize()] {
            let ray = Ray::new(Vec3::ZERO, direction);
            assert!(sphere.hit(&ray, Interval::from_min(0.001)).is_none());
        }
    }

    #[test]
    fn test_sphere_miss_negative_discriminant() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::new(2.0, 0.0, 0.0), Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_hit_from_inside_uses_far_root() {
        let sphere = unit_sphere_at(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert!(!rec.front_face);
        assert!((rec.normal - Vec3::NEG_X).length() < 1e-5);
        assert!((rec.outward_normal() - Vec3::X).length() < 1e-5);
    }

    #[test]
    fn test_both_roots_outside_interval() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -10.0), 1.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        assert!(sphere.hit(&ray, Interval::new(0.0, 8.0)).is_none());
        assert!(sphere.hit(&ray, Interval::new(11.5, 20.0)).is_none());
    }

    #[test]
    fn test_degenerate_direction_misses() {
        let sphere = unit_sphere_at(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let ray = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(sphere.hit(&ray, Interval::UNIVERSE).is_none());

        let tiny = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1e-9));
        assert!(sphere.hit(&tiny, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_rejects_invalid_radius() {
        let m = Arc::new(Material::default());
        assert!(matches!(
            Sphere::new(Vec3::ZERO, 0.0, m.clone()),
            Err(SceneError::InvalidRadius(_))
        ));
        assert!(Sphere::new(Vec3::ZERO, -1.0, m.clone()).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::NAN, m.clone()).is_err());
        assert!(Sphere::new(Vec3::ZERO, f32::INFINITY, m.clone()).is_err());
        assert!(matches!(
            Sphere::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, m),
            Err(SceneError::NonFiniteCenter(_))
        ));
    }

    #[test]
    fn test_material_is_shared() {
        let m = Arc::new(Material::GLASS);
        let a = Sphere::new(Vec3::ZERO, 1.0, m.clone()).unwrap();
        let b = Sphere::new(Vec3::X * 3.0, 1.0, m.clone()).unwrap();
        assert!(Arc::ptr_eq(a.material(), b.material()));
        assert_eq!(Arc::strong_count(&m), 3);
    }
}
