//! Pinhole camera for ray generation.

use lumen_math::{safe_normalize, Ray, Vec2, Vec3};
use thiserror::Error;

/// Distance from the eye to the virtual viewport.
pub const FOCAL_LENGTH: f32 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CameraError {
    #[error("aspect ratio must be positive and finite, got {0}")]
    InvalidAspectRatio(f32),

    #[error("vertical field of view must be within (0, 180) degrees, got {0}")]
    InvalidFieldOfView(f32),

    #[error("image must have a non-zero size, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },
}

/// Camera at the origin looking down `-z` with `+y` up.
///
/// The viewport sits one unit in front of the eye; its size is derived from the
/// vertical field of view and the aspect ratio once, at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    origin: Vec3,
    horizontal: Vec3,
    vertical: Vec3,
    lower_left: Vec3,
}

impl Camera {
    /// Create a camera from an aspect ratio (width / height) and a vertical
    /// field of view in degrees.
    pub fn new(aspect_ratio: f32, vfov: f32) -> Result<Self, CameraError> {
        if !(aspect_ratio > 0.0) || !aspect_ratio.is_finite() {
            return Err(CameraError::InvalidAspectRatio(aspect_ratio));
        }
        if !(vfov > 0.0 && vfov < 180.0) {
            return Err(CameraError::InvalidFieldOfView(vfov));
        }

        let h = (vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h * FOCAL_LENGTH;
        let viewport_width = aspect_ratio * viewport_height;

        let origin = Vec3::ZERO;
        let horizontal = Vec3::new(viewport_width, 0.0, 0.0);
        let vertical = Vec3::new(0.0, viewport_height, 0.0);
        let lower_left =
            origin - horizontal / 2.0 - vertical / 2.0 - Vec3::new(0.0, 0.0, FOCAL_LENGTH);

        Ok(Self {
            origin,
            horizontal,
            vertical,
            lower_left,
        })
    }

    /// Camera matching the proportions of a `width` x `height` image.
    pub fn for_image(width: u32, height: u32, vfov: f32) -> Result<Self, CameraError> {
        if width == 0 || height == 0 {
            return Err(CameraError::EmptyImage { width, height });
        }
        Self::new(width as f32 / height as f32, vfov)
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn horizontal(&self) -> Vec3 {
        self.horizontal
    }

    pub fn vertical(&self) -> Vec3 {
        self.vertical
    }

    pub fn lower_left(&self) -> Vec3 {
        self.lower_left
    }

    /// Unit-length ray through viewport coordinates `(u, v)`, where `(0, 0)` is
    /// the lower left corner and `(1, 1)` the upper right.
    pub fn get_ray(&self, u: f32, v: f32) -> Ray {
        let target = self.lower_left + u * self.horizontal + v * self.vertical;
        let direction = safe_normalize(target - self.origin).unwrap_or(Vec3::NEG_Z);
        Ray::new(self.origin, direction)
    }

    /// Ray through pixel `(x, y)` of a `width` x `height` image, row 0 at the top.
    ///
    /// `offset` is the sub-pixel position in `[0, 1)`; `(0.5, 0.5)` is the
    /// pixel center.
    pub fn pixel_ray(&self, x: u32, y: u32, width: u32, height: u32, offset: Vec2) -> Ray {
        let u = (x as f32 + offset.x) / width as f32;
        let v = 1.0 - (y as f32 + offset.y) / height as f32;
        self.get_ray(u, v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_from_fov() {
        let camera = Camera::new(1.6, 90.0).unwrap();

        assert!((camera.vertical().y - 2.0).abs() < 1e-5);
        assert!((camera.horizontal().x - 3.2).abs() < 1e-5);
        assert!((camera.lower_left() - Vec3::new(-1.6, -1.0, -1.0)).length() < 1e-5);
        assert_eq!(camera.origin(), Vec3::ZERO);
    }

    #[test]
    fn test_center_ray_looks_down_negative_z() {
        let camera = Camera::new(16.0 / 9.0, 60.0).unwrap();
        let ray = camera.get_ray(0.5, 0.5);

        assert_eq!(ray.origin, Vec3::ZERO);
        assert!((ray.direction - Vec3::NEG_Z).length() < 1e-6);
    }

    #[test]
    fn test_rays_are_unit_length() {
        let camera = Camera::new(2.0, 90.0).unwrap();
        for (u, v) in [(0.0, 0.0), (1.0, 1.0), (0.25, 0.9), (0.7, 0.1)] {
            let ray = camera.get_ray(u, v);
            assert!((ray.direction.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_corner_rays() {
        let camera = Camera::new(1.0, 90.0).unwrap();

        let lower_left = camera.get_ray(0.0, 0.0).direction;
        assert!((lower_left - Vec3::new(-1.0, -1.0, -1.0).normalize()).length() < 1e-5);

        let upper_right = camera.get_ray(1.0, 1.0).direction;
        assert!((upper_right - Vec3::new(1.0, 1.0, -1.0).normalize()).length() < 1e-5);
    }

    #[test]
    fn test_pixel_ray_row_zero_is_top() {
        let camera = Camera::for_image(4, 4, 90.0).unwrap();
        let top = camera.pixel_ray(1, 0, 4, 4, Vec2::splat(0.5));
        let bottom = camera.pixel_ray(1, 3, 4, 4, Vec2::splat(0.5));

        assert!(top.direction.y > 0.0);
        assert!(bottom.direction.y < 0.0);
        assert!((top.direction.y + bottom.direction.y).abs() < 1e-5);
    }

    #[test]
    fn test_invalid_parameters() {
        assert_eq!(
            Camera::new(0.0, 90.0),
            Err(CameraError::InvalidAspectRatio(0.0))
        );
        assert!(Camera::new(f32::INFINITY, 90.0).is_err());
        assert_eq!(
            Camera::new(1.0, 180.0),
            Err(CameraError::InvalidFieldOfView(180.0))
        );
        assert!(Camera::new(1.0, 0.0).is_err());
        assert_eq!(
            Camera::for_image(0, 10, 90.0),
            Err(CameraError::EmptyImage {
                width: 0,
                height: 10
            })
        );
    }
}
