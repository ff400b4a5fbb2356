//! The seam between frame assembly and a light transport policy.

use lumen_math::{Ray, Vec2};
use rand::RngCore;

use crate::{Color, Pixel, Scene};

/// A light transport policy: how a ray is turned into a color, and how a
/// pixel's averaged color is turned into an output pixel.
pub trait Integrator: Send + Sync {
    /// Rays traced per pixel. Values below one are treated as one.
    fn samples_per_pixel(&self) -> u32;

    /// Sub-pixel position in `[0, 1)` of the next camera ray.
    fn pixel_offset(&self, rng: &mut dyn RngCore) -> Vec2;

    /// Color arriving along `ray`.
    fn radiance(&self, ray: &Ray, scene: &Scene, rng: &mut dyn RngCore) -> Color;

    /// Convert a linear color to an output pixel.
    fn tone_map(&self, color: Color) -> Pixel;
}
