//! Frame assembly: one pass over every pixel of the image.
//!
//! Each pixel is independent. It reads the shared scene and writes only its own
//! cell, so a host may split the work (see [`crate::Bucket`]) as it sees fit.

use rand::RngCore;

use crate::{Camera, Color, FrameBuffer, FrameError, Integrator, Pixel, Scene};

/// Average color of pixel `(x, y)` over the integrator's samples, before tone mapping.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    (x, y): (u32, u32),
    (width, height): (u32, u32),
    rng: &mut dyn RngCore,
) -> Color {
    let samples = integrator.samples_per_pixel().max(1);
    let mut pixel_color = Color::ZERO;

    for _ in 0..samples {
        let offset = integrator.pixel_offset(rng);
        let ray = camera.pixel_ray(x, y, width, height, offset);
        pixel_color += integrator.radiance(&ray, scene, rng);
    }

    // Average the samples
    pixel_color / samples as f32
}

/// Render every pixel into a caller-owned, row-major buffer of `width * height` pixels.
pub fn render_into(
    pixels: &mut [Pixel],
    (width, height): (u32, u32),
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    rng: &mut dyn RngCore,
) -> Result<(), FrameError> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(FrameError::SizeMismatch {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }

    fill_pixels(pixels, (width, height), camera, scene, integrator, rng);
    Ok(())
}

/// Shade every pixel of a buffer already known to hold `width * height` pixels.
fn fill_pixels(
    pixels: &mut [Pixel],
    (width, height): (u32, u32),
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    rng: &mut dyn RngCore,
) {
    log::debug!(
        "Rendering {}x{} with {} objects, {} lights, {} spp",
        width,
        height,
        scene.len(),
        scene.lights.len(),
        integrator.samples_per_pixel()
    );

    if width == 0 {
        return;
    }
    for (y, row) in pixels.chunks_exact_mut(width as usize).enumerate() {
        for (x, pixel) in row.iter_mut().enumerate() {
            let color = render_pixel(
                camera,
                scene,
                integrator,
                (x as u32, y as u32),
                (width, height),
                rng,
            );
            *pixel = integrator.tone_map(color);
        }
    }
}

/// Render the entire scene to a new frame buffer.
///
/// This is a simple single-threaded pass.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    width: u32,
    height: u32,
    rng: &mut dyn RngCore,
) -> FrameBuffer {
    let mut image = FrameBuffer::new(width, height);
    fill_pixels(
        image.pixels_mut(),
        (width, height),
        camera,
        scene,
        integrator,
        rng,
    );
    image
}
