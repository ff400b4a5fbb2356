//! Lumen math - vectors, rays and intervals shared by the renderer.

// Re-export glam for convenience
pub use glam::*;

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{reflect, refract, safe_normalize, NORMALIZE_EPSILON};
