//! Scene container: primitives plus point lights.

use lumen_math::{Interval, Ray, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{HitRecord, Hittable, HittableList};

/// Errors raised while building a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("sphere center {0} is not finite")]
    NonFiniteCenter(Vec3),

    #[error("light intensity must be non-negative and finite, got {0}")]
    InvalidIntensity(f32),

    #[error("light position {0} is not finite")]
    NonFinitePosition(Vec3),
}

/// A point light. Intensity is applied as-is, with no distance falloff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32) -> Result<Self, SceneError> {
        if !position.is_finite() {
            return Err(SceneError::NonFinitePosition(position));
        }
        if !(intensity >= 0.0) || !intensity.is_finite() {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        Ok(Self {
            position,
            intensity,
        })
    }
}

/// Everything a frame is rendered from.
///
/// Lights are only consulted by the Whitted policy.
#[derive(Default)]
pub struct Scene {
    pub world: HittableList,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: impl Hittable + 'static) {
        self.world.add(Box::new(object));
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light);
    }

    /// Nearest hit along `ray` strictly inside `ray_t`.
    #[inline]
    pub fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        self.world.hit(ray, ray_t)
    }

    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.world.len()
    }

    pub fn is_empty(&self) -> bool {
        self.world.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Material, Sphere};
    use std::sync::Arc;

    #[test]
    fn test_light_validation() {
        assert!(Light::new(Vec3::new(-20.0, 20.0, 20.0), 1.5).is_ok());
        assert!(Light::new(Vec3::ZERO, 0.0).is_ok());
        assert_eq!(
            Light::new(Vec3::ZERO, -1.0),
            Err(SceneError::InvalidIntensity(-1.0))
        );
        assert!(Light::new(Vec3::ZERO, f32::NAN).is_err());
        assert!(Light::new(Vec3::splat(f32::INFINITY), 1.0).is_err());
    }

    #[test]
    fn test_scene_hit_delegates_to_world() {
        let mut scene = Scene::new();
        assert!(scene.is_empty());

        scene.add(Sphere::new(Vec3::new(0.0, 0.0, -3.0), 1.0, Arc::new(Material::RUBBER)).unwrap());
        assert_eq!(scene.len(), 1);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let rec = scene.hit(&ray, Interval::from_min(0.001)).unwrap();
        assert!((rec.t - 2.0).abs() < 1e-5);
        assert_eq!(*rec.material, Material::RUBBER);
    }

    #[test]
    fn test_error_messages() {
        let err = SceneError::InvalidRadius(-2.0);
        assert!(err.to_string().contains("-2"));
    }
}
