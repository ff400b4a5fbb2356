//! Lumen renderer - CPU ray tracing core.
//!
//! Two light transport policies share the same scene, camera and frame
//! assembly code:
//! - Whitted-style analytic shading with point lights, mirror reflection and
//!   refraction ([`WhittedConfig`])
//! - Monte Carlo diffuse path tracing with jittered multi-sampling
//!   ([`PathConfig`])
//!
//! The core never spawns threads. Frames can be split into [`Bucket`]s that a
//! host renders on whatever scheduler it likes.

mod bucket;
mod camera;
mod framebuffer;
mod hittable;
mod integrator;
mod material;
mod path;
pub mod presets;
mod renderer;
mod sampling;
mod scene;
mod sphere;
mod whitted;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::{Camera, CameraError, FOCAL_LENGTH};
pub use framebuffer::{
    linear_to_gamma, tone_map_gamma, tone_map_rescale, FrameBuffer, FrameError, Pixel,
};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use integrator::Integrator;
pub use material::{Color, Material};
pub use path::{ray_color, sky_gradient, PathConfig};
pub use renderer::{render, render_into, render_pixel};
pub use sampling::{gen_f32, random_in_unit_sphere, random_unit_vector, sample_square};
pub use scene::{Light, Scene, SceneError};
pub use sphere::Sphere;
pub use whitted::{cast_ray, WhittedConfig};

/// Re-export common math types from lumen_math
pub use lumen_math::{Interval, Ray, Vec2, Vec3, Vec4};
