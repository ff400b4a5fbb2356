//! Parallel frame rendering: buckets are spread over rayon's thread pool.

use anyhow::Result;
use lumen_renderer::{
    generate_buckets, render_bucket, BucketResult, Camera, FrameBuffer, Integrator, Scene,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

/// Seed for one bucket of one frame, so output does not depend on thread timing.
pub fn bucket_seed(seed: u64, frame: u32, bucket: usize) -> u64 {
    seed.wrapping_add((frame as u64) << 32)
        .wrapping_add(bucket as u64)
        .wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

/// Render one frame with every bucket on the pool.
///
/// The scene is only borrowed, so it cannot change while workers read it.
pub fn render_frame(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    (width, height): (u32, u32),
    bucket_size: u32,
    seed: u64,
    frame: u32,
) -> Result<FrameBuffer> {
    let buckets = generate_buckets(width, height, bucket_size);
    log::debug!("Frame {}: {} buckets", frame, buckets.len());

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut rng = StdRng::seed_from_u64(bucket_seed(seed, frame, bucket.index));
            render_bucket(bucket, (width, height), camera, scene, integrator, &mut rng)
        })
        .collect();

    let mut image = FrameBuffer::new(width, height);
    for result in &results {
        image.write_bucket(result)?;
    }
    Ok(image)
}
