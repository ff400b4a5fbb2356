//! Writing frames to disk.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::{ColorType, ImageFormat};
use lumen_renderer::FrameBuffer;

use crate::settings::OutputFormat;

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Ppm => "ppm",
        }
    }
}

/// Path for `frame` of a `frames` long sequence.
///
/// A single frame goes to `output` itself; sequences get a zero-padded frame
/// number appended to the file stem. When `output` names a directory the
/// frames are written inside it as `frame.ext` or `frame_NNNN.ext`.
pub fn frame_path(output: &Path, frame: u32, frames: u32, format: OutputFormat) -> PathBuf {
    let ext = format.extension();
    if is_directory(output) {
        return if frames <= 1 {
            output.join(format!("frame.{}", ext))
        } else {
            output.join(format!("frame_{:04}.{}", frame, ext))
        };
    }

    if frames <= 1 {
        return output.with_extension(ext);
    }
    let stem = output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    output.with_file_name(format!("{}_{:04}.{}", stem, frame, ext))
}

/// An existing directory, or a path spelled with a trailing separator.
fn is_directory(output: &Path) -> bool {
    output.is_dir()
        || output
            .as_os_str()
            .to_string_lossy()
            .ends_with(std::path::is_separator)
}

pub fn save(frame: &FrameBuffer, path: &Path, format: OutputFormat) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let written = match format {
        OutputFormat::Png => save_png(frame, path),
        OutputFormat::Ppm => save_ppm(frame, path),
    };
    written.with_context(|| format!("failed to write {}", path.display()))
}

fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    image::save_buffer_with_format(
        path,
        frame.as_bytes(),
        frame.width(),
        frame.height(),
        ColorType::Rgba8,
        ImageFormat::Png,
    )?;
    Ok(())
}

fn save_ppm(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", frame.width(), frame.height())?;
    writeln!(writer, "255")?;

    for pixel in frame.pixels() {
        writeln!(writer, "{} {} {}", pixel.r, pixel.g, pixel.b)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Pixel;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lumen_output_{}_{}", name, std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_frame_path_single() {
        let path = frame_path(Path::new("renders/shot.png"), 0, 1, OutputFormat::Ppm);
        assert_eq!(path, PathBuf::from("renders/shot.ppm"));
    }

    #[test]
    fn test_frame_path_sequence() {
        let path = frame_path(Path::new("renders/shot.png"), 12, 48, OutputFormat::Png);
        assert_eq!(path, PathBuf::from("renders/shot_0012.png"));
    }

    #[test]
    fn test_frame_path_existing_directory() {
        let dir = scratch_dir("dir");

        let single = frame_path(&dir, 0, 1, OutputFormat::Png);
        assert_eq!(single, dir.join("frame.png"));

        let sequence = frame_path(&dir, 3, 10, OutputFormat::Ppm);
        assert_eq!(sequence, dir.join("frame_0003.ppm"));
    }

    #[test]
    fn test_frame_path_trailing_separator() {
        let output = PathBuf::from(format!("not_created_yet{}", std::path::MAIN_SEPARATOR));

        let path = frame_path(&output, 7, 24, OutputFormat::Png);
        assert!(path.starts_with("not_created_yet"));
        assert_eq!(path.file_name().unwrap(), "frame_0007.png");
    }

    #[test]
    fn test_save_ppm() {
        let mut frame = FrameBuffer::new(2, 1);
        frame.set(0, 0, Pixel::new(255, 0, 10));

        let path = scratch_dir("ppm").join("tiny.ppm");
        save(&frame, &path, OutputFormat::Ppm).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 0 10\n0 0 0\n");
    }

    #[test]
    fn test_save_png_round_trip() {
        let mut frame = FrameBuffer::new(3, 2);
        frame.set(2, 1, Pixel::new(10, 20, 30));

        let path = scratch_dir("png").join("nested/tiny.png");
        save(&frame, &path, OutputFormat::Png).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.get_pixel(2, 1).0, [10, 20, 30, 255]);
    }
}
