//! Monte Carlo diffuse path tracing.
//!
//! Every surface scatters like a gray Lambertian with a fixed albedo; color
//! comes only from the sky. Noise is reduced by multi-sampling each pixel with
//! jittered camera rays and averaging.

use lumen_math::{safe_normalize, Interval, Ray, Vec2};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::{random_unit_vector, sample_square, tone_map_gamma, Color, Integrator, Pixel, Scene};

/// Settings for the stochastic policy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Fraction of light kept at each bounce
    pub diffuse_albedo: f32,
    /// Closest accepted hit, keeps scattered rays off their own surface
    pub t_min: f32,
    /// Sky color looking straight down
    pub sky_horizon: Color,
    /// Sky color looking straight up
    pub sky_zenith: Color,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            samples_per_pixel: 100,
            max_depth: 50,
            diffuse_albedo: 0.5,
            t_min: 0.001,
            sky_horizon: Color::ONE,
            sky_zenith: Color::new(0.5, 0.7, 1.0),
        }
    }
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray, config: &PathConfig) -> Color {
    let unit_direction = safe_normalize(ray.direction).unwrap_or(ray.direction);
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * config.sky_horizon + a * config.sky_zenith
}

/// Compute the color seen by a ray.
///
/// Running out of depth returns black, which slightly darkens deep paths.
pub fn ray_color(
    ray: &Ray,
    scene: &Scene,
    depth: u32,
    config: &PathConfig,
    rng: &mut dyn RngCore,
) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::from_min(config.t_min)) else {
        return sky_gradient(ray, config);
    };

    // Catch degenerate scatter direction
    let direction = safe_normalize(rec.normal + random_unit_vector(rng)).unwrap_or(rec.normal);
    let scattered = Ray::new(rec.p, direction);
    config.diffuse_albedo * ray_color(&scattered, scene, depth - 1, config, rng)
}

impl Integrator for PathConfig {
    fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    fn pixel_offset(&self, rng: &mut dyn RngCore) -> Vec2 {
        sample_square(rng)
    }

    fn radiance(&self, ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Color {
        ray_color(ray, scene, self.max_depth, self, rng)
    }

    fn tone_map(&self, color: Color) -> Pixel {
        tone_map_gamma(color)
    }
}
