//! 8-bit output pixels, tone mapping and the frame buffer.

use bytemuck::{Pod, Zeroable};
use lumen_math::Interval;
use thiserror::Error;

use crate::{BucketResult, Color};

/// Errors raised while writing pixels into a buffer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FrameError {
    #[error("pixel buffer holds {actual} pixels, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("bucket at ({x}, {y}) of size {width}x{height} does not fit the frame")]
    BucketOutOfBounds { x: u32, y: u32, width: u32, height: u32 },
}

/// One RGBA pixel. Alpha is always opaque.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Pixel {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Scale a channel in `[0, 1]` to a byte.
#[inline]
fn to_byte(channel: f32) -> u8 {
    (255.0 * channel) as u8
}

/// Tone map used by the Whitted policy.
///
/// When the brightest channel exceeds one, every channel is divided by it so
/// the hue survives instead of clipping per channel. No gamma is applied.
pub fn tone_map_rescale(color: Color) -> Pixel {
    let max = color.max_element();
    let color = if max > 1.0 { color / max } else { color };
    let unit = Interval::new(0.0, 1.0);
    Pixel::new(
        to_byte(unit.clamp(color.x)),
        to_byte(unit.clamp(color.y)),
        to_byte(unit.clamp(color.z)),
    )
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: f32) -> f32 {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Tone map used by the path tracing policy: square root, then clamp to `[0, 0.999]`.
pub fn tone_map_gamma(color: Color) -> Pixel {
    let intensity = Interval::new(0.0, 0.999);
    Pixel::new(
        to_byte(intensity.clamp(linear_to_gamma(color.x))),
        to_byte(intensity.clamp(linear_to_gamma(color.y))),
        to_byte(intensity.clamp(linear_to_gamma(color.z))),
    )
}

/// Row-major pixel storage for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl FrameBuffer {
    /// Create a new frame buffer filled with opaque black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[self.index(x, y)])
    }

    /// Set the pixel at (x, y). Out-of-range coordinates are ignored.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        if x < self.width && y < self.height {
            let index = self.index(x, y);
            self.pixels[index] = pixel;
        }
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) -> Result<(), FrameError> {
        let bucket = &result.bucket;
        let fits = bucket.x.checked_add(bucket.width).is_some_and(|r| r <= self.width)
            && bucket.y.checked_add(bucket.height).is_some_and(|b| b <= self.height)
            && result.pixels.len() == bucket.pixel_count() as usize;
        if !fits {
            return Err(FrameError::BucketOutOfBounds {
                x: bucket.x,
                y: bucket.y,
                width: bucket.width,
                height: bucket.height,
            });
        }

        if bucket.width == 0 {
            return Ok(());
        }
        for (row, src) in result.pixels.chunks_exact(bucket.width as usize).enumerate() {
            let start = self.index(bucket.x, bucket.y + row as u32);
            self.pixels[start..start + src.len()].copy_from_slice(src);
        }
        Ok(())
    }

    /// Raw RGBA bytes, ready for upload or encoding.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Owned copy of the RGBA bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bucket;

    #[test]
    fn test_rescale_keeps_in_range_colors() {
        assert_eq!(tone_map_rescale(Color::new(1.0, 0.5, 0.0)), Pixel::new(255, 127, 0));
        assert_eq!(tone_map_rescale(Color::ZERO), Pixel::BLACK);
    }

    #[test]
    fn test_rescale_preserves_hue() {
        // (2, 1, 0.5) / 2 = (1, 0.5, 0.25)
        let p = tone_map_rescale(Color::new(2.0, 1.0, 0.5));
        assert_eq!(p, Pixel::new(255, 127, 63));
        assert_eq!(p.a, 255);
    }

    #[test]
    fn test_rescale_clamps_negative() {
        let p = tone_map_rescale(Color::new(-0.5, 0.5, 0.5));
        assert_eq!(p.r, 0);
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert_eq!(linear_to_gamma(-1.0), 0.0);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_gamma_tone_map() {
        // sqrt(0.25) = 0.5, 0.5 * 255 = 127.5
        assert_eq!(tone_map_gamma(Color::splat(0.25)), Pixel::new(127, 127, 127));
        // Clamped at 0.999 before scaling
        assert_eq!(tone_map_gamma(Color::splat(4.0)), Pixel::new(254, 254, 254));
        assert_eq!(tone_map_gamma(Color::ZERO), Pixel::BLACK);
    }

    #[test]
    fn test_pixel_layout() {
        assert_eq!(std::mem::size_of::<Pixel>(), 4);
        let fb = {
            let mut fb = FrameBuffer::new(2, 1);
            fb.set(1, 0, Pixel::new(1, 2, 3));
            fb
        };
        assert_eq!(fb.as_bytes(), &[0, 0, 0, 255, 1, 2, 3, 255]);
        assert_eq!(fb.to_bytes().len(), 8);
    }

    #[test]
    fn test_get_set_bounds() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.set(2, 1, Pixel::new(9, 9, 9));
        fb.set(3, 1, Pixel::new(1, 1, 1));

        assert_eq!(fb.get(2, 1), Some(Pixel::new(9, 9, 9)));
        assert_eq!(fb.get(3, 0), None);
        assert_eq!(fb.pixels()[5], Pixel::new(9, 9, 9));
    }

    #[test]
    fn test_write_bucket() {
        let mut fb = FrameBuffer::new(4, 4);
        let bucket = Bucket::new(2, 1, 2, 2, 0);
        let pixels = vec![Pixel::new(1, 0, 0), Pixel::new(2, 0, 0), Pixel::new(3, 0, 0), Pixel::new(4, 0, 0)];
        fb.write_bucket(&BucketResult::new(bucket, pixels)).unwrap();

        assert_eq!(fb.get(2, 1), Some(Pixel::new(1, 0, 0)));
        assert_eq!(fb.get(3, 1), Some(Pixel::new(2, 0, 0)));
        assert_eq!(fb.get(2, 2), Some(Pixel::new(3, 0, 0)));
        assert_eq!(fb.get(3, 2), Some(Pixel::new(4, 0, 0)));
        assert_eq!(fb.get(1, 1), Some(Pixel::BLACK));
    }

    #[test]
    fn test_write_bucket_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 4);
        let bucket = Bucket::new(3, 3, 2, 2, 0);
        let result = BucketResult::new(bucket, vec![Pixel::BLACK; 4]);
        assert!(matches!(
            fb.write_bucket(&result),
            Err(FrameError::BucketOutOfBounds { .. })
        ));
    }
}
