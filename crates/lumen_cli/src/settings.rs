//! Render settings: defaults, optional JSON file, command line overrides.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::ValueEnum;
use lumen_renderer::{PathConfig, WhittedConfig, DEFAULT_BUCKET_SIZE};
use serde::{Deserialize, Serialize};

/// Deepest recursion either policy may be configured with. Both integrators
/// recurse once per bounce, so this keeps a frame inside the thread stack.
pub const MAX_DEPTH_LIMIT: u32 = 64;

/// Light transport policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// Point lights, shadows, reflection and refraction, one ray per pixel
    Whitted,
    /// Monte Carlo diffuse path tracing with multi-sampling
    Path,
}

/// Built-in scene to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SceneChoice {
    /// Four spheres and three lights, the ivory sphere bobs over time
    Showcase,
    /// The showcase plus a glass sphere
    Glass,
    /// A small sphere on a ground sphere
    Diffuse,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Png,
    Ppm,
}

/// Everything the host needs to render a sequence of frames.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub policy: Policy,
    /// Defaults to the showcase for Whitted and the diffuse pair for path tracing
    pub scene: Option<SceneChoice>,
    pub width: u32,
    pub height: u32,
    /// Vertical field of view in degrees; defaults per policy
    pub vfov: Option<f32>,
    pub seed: u64,
    pub frames: u32,
    pub fps: f32,
    pub bucket_size: u32,
    /// Worker threads, 0 lets rayon decide
    pub threads: usize,
    pub output: PathBuf,
    /// Inferred from the output extension when unset
    pub format: Option<OutputFormat>,
    pub whitted: WhittedConfig,
    pub path: PathConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            policy: Policy::Whitted,
            scene: None,
            width: 640,
            height: 400,
            vfov: None,
            seed: 0,
            frames: 1,
            fps: 24.0,
            bucket_size: DEFAULT_BUCKET_SIZE,
            threads: 0,
            output: PathBuf::from("frame.png"),
            format: None,
            whitted: WhittedConfig::default(),
            path: PathConfig::default(),
        }
    }
}

impl Settings {
    /// Read settings from a JSON file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        serde_json::from_str(&text)
            .with_context(|| format!("failed to parse settings file {}", path.display()))
    }

    pub fn scene(&self) -> SceneChoice {
        self.scene.unwrap_or(match self.policy {
            Policy::Whitted => SceneChoice::Showcase,
            Policy::Path => SceneChoice::Diffuse,
        })
    }

    pub fn vfov(&self) -> f32 {
        self.vfov.unwrap_or(match self.policy {
            Policy::Whitted => 60.0,
            Policy::Path => 90.0,
        })
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_else(|| {
            let is_ppm = self
                .output
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("ppm"));
            if is_ppm {
                OutputFormat::Ppm
            } else {
                OutputFormat::Png
            }
        })
    }

    /// Set the ray depth of the active policy.
    pub fn set_max_depth(&mut self, depth: u32) {
        match self.policy {
            Policy::Whitted => self.whitted.max_depth = depth,
            Policy::Path => self.path.max_depth = depth,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "image size must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.frames > 0, "at least one frame must be rendered");
        ensure!(
            self.fps > 0.0 && self.fps.is_finite(),
            "fps must be positive, got {}",
            self.fps
        );
        ensure!(self.bucket_size > 0, "bucket size must be positive");
        ensure!(
            self.whitted.max_depth <= MAX_DEPTH_LIMIT,
            "whitted max depth must be at most {}, got {}",
            MAX_DEPTH_LIMIT,
            self.whitted.max_depth
        );
        ensure!(
            self.path.max_depth <= MAX_DEPTH_LIMIT,
            "path max depth must be at most {}, got {}",
            MAX_DEPTH_LIMIT,
            self.path.max_depth
        );
        Ok(())
    }
}
