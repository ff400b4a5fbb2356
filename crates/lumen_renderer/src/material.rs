//! Surface materials.

use lumen_math::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Color type alias (linear RGB, typically 0-1)
pub type Color = Vec3;

/// How light interacts with a surface.
///
/// `albedo` splits the outgoing energy between local diffuse shading (`x`),
/// specular highlights (`y`), mirror reflection (`z`) and transmission (`w`).
/// The split is not normalized; a mirror may carry a specular weight above one.
///
/// Materials are immutable once built and shared between primitives through
/// `Arc<Material>`. The path tracing policy only looks at the hit geometry, so
/// a material built with [`Material::lambertian`] is enough there.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub albedo: Vec4,
    pub diffuse: Color,
    pub specular_exponent: f32,
    pub refractive_index: f32,
}

impl Material {
    pub const IVORY: Material = Material::new(
        Vec4::new(0.6, 0.3, 0.1, 0.0),
        Color::new(0.4, 0.4, 0.3),
        50.0,
        1.0,
    );

    pub const GLASS: Material = Material::new(
        Vec4::new(0.0, 0.5, 0.1, 0.8),
        Color::new(0.6, 0.7, 0.8),
        125.0,
        1.5,
    );

    pub const RUBBER: Material = Material::new(
        Vec4::new(0.9, 0.1, 0.0, 0.0),
        Color::new(0.3, 0.1, 0.1),
        10.0,
        1.0,
    );

    pub const MIRROR: Material = Material::new(
        Vec4::new(0.0, 10.0, 0.8, 0.0),
        Color::new(1.0, 1.0, 1.0),
        1425.0,
        1.0,
    );

    pub const fn new(
        albedo: Vec4,
        diffuse: Color,
        specular_exponent: f32,
        refractive_index: f32,
    ) -> Self {
        Self {
            albedo,
            diffuse,
            specular_exponent,
            refractive_index,
        }
    }

    /// Purely diffuse, opaque surface: no highlight, no reflection, no transmission.
    pub const fn lambertian(diffuse: Color) -> Self {
        Self::new(Vec4::new(1.0, 0.0, 0.0, 0.0), diffuse, 1.0, 1.0)
    }

    pub fn reflects(&self) -> bool {
        self.albedo.z != 0.0
    }

    pub fn transmits(&self) -> bool {
        self.albedo.w != 0.0
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::lambertian(Color::splat(0.5))
    }
}
