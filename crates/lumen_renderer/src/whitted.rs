//! Whitted-style transport: point lights, hard shadows, Phong highlights,
//! mirror reflection and refraction.

use lumen_math::{reflect, refract, safe_normalize, Interval, Ray, Vec2, Vec3};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{tone_map_rescale, Color, Integrator, Pixel, Scene};

/// Settings for the analytic policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WhittedConfig {
    /// Ray generations per pixel, the primary ray included
    pub max_depth: u32,
    /// Flat color returned by rays that escape or run out of depth
    pub background: Color,
    /// Offset along the normal for secondary and shadow ray origins
    pub bias: f32,
    /// Hits further than this are ignored
    pub max_distance: f32,
}

impl Default for WhittedConfig {
    fn default() -> Self {
        Self {
            max_depth: 5,
            background: Color::new(0.2, 0.7, 0.8),
            bias: 1e-3,
            max_distance: 1000.0,
        }
    }
}

/// Move `point` off the surface, to the side of the normal `direction` leaves through.
#[inline]
fn offset_origin(point: Vec3, normal: Vec3, direction: Vec3, bias: f32) -> Vec3 {
    if direction.dot(normal) < 0.0 {
        point - normal * bias
    } else {
        point + normal * bias
    }
}

/// Color seen along `ray` with `depth` ray generations left.
pub fn cast_ray(ray: &Ray, scene: &Scene, depth: u32, config: &WhittedConfig) -> Color {
    if depth == 0 {
        return config.background;
    }

    let Some(rec) = scene.hit(ray, Interval::new(0.0, config.max_distance)) else {
        return config.background;
    };

    let material = rec.material;
    let normal = rec.outward_normal();
    let direction = safe_normalize(ray.direction).unwrap_or(ray.direction);

    let secondary = |bounce: Vec3| -> Color {
        match safe_normalize(bounce) {
            Some(bounce) => {
                let origin = offset_origin(rec.p, normal, bounce, config.bias);
                cast_ray(&Ray::new(origin, bounce), scene, depth - 1, config)
            }
            None => config.background,
        }
    };

    let reflect_color = if material.reflects() {
        secondary(reflect(direction, normal))
    } else {
        Color::ZERO
    };

    let refract_color = if material.transmits() {
        secondary(refract(direction, normal, material.refractive_index, 1.0))
    } else {
        Color::ZERO
    };

    let mut diffuse_intensity = 0.0;
    let mut specular_intensity = 0.0;
    for light in &scene.lights {
        let to_light = light.position - rec.p;
        let light_distance = to_light.length();
        let Some(light_dir) = safe_normalize(to_light) else {
            continue;
        };

        let shadow_origin = offset_origin(rec.p, normal, light_dir, config.bias);
        let shadow_ray = Ray::new(shadow_origin, light_dir);
        if scene.hit(&shadow_ray, Interval::new(0.0, light_distance)).is_some() {
            continue;
        }

        diffuse_intensity += light_dir.dot(normal).max(0.0) * light.intensity;
        specular_intensity += reflect(light_dir, normal)
            .dot(direction)
            .max(0.0)
            .powf(material.specular_exponent)
            * light.intensity;
    }

    let albedo = material.albedo;
    material.diffuse * diffuse_intensity * albedo.x
        + Color::ONE * specular_intensity * albedo.y
        + reflect_color * albedo.z
        + refract_color * albedo.w
}

impl Integrator for WhittedConfig {
    fn samples_per_pixel(&self) -> u32 {
        1
    }

    fn pixel_offset(&self, _rng: &mut dyn RngCore) -> Vec2 {
        Vec2::splat(0.5)
    }

    fn radiance(&self, ray: &Ray, scene: &Scene, _rng: &mut dyn RngCore) -> Color {
        cast_ray(ray, scene, self.max_depth, self)
    }

    fn tone_map(&self, color: Color) -> Pixel {
        tone_map_rescale(color)
    }
}
