//! Lumen - renders the built-in sphere scenes to image files.
//!
//! The renderer core produces pixel buffers; this host parses settings,
//! schedules buckets across threads, animates the scene between frames and
//! writes the results to disk.

mod frame;
mod output;
mod settings;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use lumen_renderer::{presets, presets::Showcase, Camera, Integrator, Scene};

use settings::{OutputFormat, Policy, SceneChoice, Settings};

/// Ray trace spheres with Whitted shading or diffuse path tracing
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about)]
struct Cli {
    /// JSON settings file; command line flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Light transport policy
    #[arg(short, long, value_enum)]
    policy: Option<Policy>,

    /// Scene to render (defaults depend on the policy)
    #[arg(short, long, value_enum)]
    scene: Option<SceneChoice>,

    /// Image width in pixels
    #[arg(short = 'W', long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Samples per pixel (path tracing only)
    #[arg(long)]
    samples: Option<u32>,

    /// Maximum ray depth for the selected policy
    #[arg(short = 'd', long)]
    max_depth: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    fov: Option<f32>,

    /// Random seed for sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Number of frames to render
    #[arg(short, long)]
    frames: Option<u32>,

    /// Frames per second of the animation clock
    #[arg(long)]
    fps: Option<f32>,

    /// Bucket edge length in pixels
    #[arg(long)]
    bucket_size: Option<u32>,

    /// Worker threads (0 = one per core)
    #[arg(short = 'j', long)]
    threads: Option<usize>,

    /// Output file or directory; sequences get a frame number appended
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (defaults to the output file extension)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,
}

impl Cli {
    fn settings(&self) -> Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load(path)?,
            None => Settings::default(),
        };

        if let Some(policy) = self.policy {
            settings.policy = policy;
        }
        if let Some(scene) = self.scene {
            settings.scene = Some(scene);
        }
        if let Some(width) = self.width {
            settings.width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if let Some(samples) = self.samples {
            settings.path.samples_per_pixel = samples;
        }
        if let Some(depth) = self.max_depth {
            settings.set_max_depth(depth);
        }
        if let Some(fov) = self.fov {
            settings.vfov = Some(fov);
        }
        if let Some(seed) = self.seed {
            settings.seed = seed;
        }
        if let Some(frames) = self.frames {
            settings.frames = frames;
        }
        if let Some(fps) = self.fps {
            settings.fps = fps;
        }
        if let Some(bucket_size) = self.bucket_size {
            settings.bucket_size = bucket_size;
        }
        if let Some(threads) = self.threads {
            settings.threads = threads;
        }
        if let Some(output) = &self.output {
            settings.output = output.clone();
        }
        if let Some(format) = self.format {
            settings.format = Some(format);
        }

        settings.validate()?;
        Ok(settings)
    }
}

/// A scene plus whatever moves in it between frames.
enum Stage {
    Animated(Showcase),
    Still(Scene),
}

impl Stage {
    fn build(choice: SceneChoice) -> Result<Self> {
        let stage = match choice {
            SceneChoice::Showcase => Stage::Animated(presets::whitted_showcase()?),
            SceneChoice::Glass => Stage::Animated(presets::glass_showcase()?),
            SceneChoice::Diffuse => Stage::Still(presets::diffuse_pair()?),
        };
        Ok(stage)
    }

    fn scene(&self) -> &Scene {
        match self {
            Stage::Animated(showcase) => &showcase.scene,
            Stage::Still(scene) => scene,
        }
    }

    /// Per-frame mutation hook, called while no frame is in flight.
    fn set_time(&mut self, seconds: f32) {
        if let Stage::Animated(showcase) = self {
            showcase.set_time(seconds);
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Cli::parse().settings()?;
    log::info!("Starting Lumen ({:?} policy)", settings.policy);

    if settings.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(settings.threads)
            .build_global()
            .context("failed to configure the thread pool")?;
    }

    let camera = Camera::for_image(settings.width, settings.height, settings.vfov())
        .context("invalid camera settings")?;
    let mut stage = Stage::build(settings.scene()).context("failed to build the scene")?;
    let integrator: &dyn Integrator = match settings.policy {
        Policy::Whitted => &settings.whitted,
        Policy::Path => &settings.path,
    };
    let format = settings.format();

    log::info!(
        "Rendering {} frame(s) of {:?} at {}x{}, {} spp",
        settings.frames,
        settings.scene(),
        settings.width,
        settings.height,
        integrator.samples_per_pixel().max(1)
    );

    let total = Instant::now();
    for index in 0..settings.frames {
        stage.set_time(index as f32 / settings.fps);

        let start = Instant::now();
        let image = frame::render_frame(
            &camera,
            stage.scene(),
            integrator,
            (settings.width, settings.height),
            settings.bucket_size,
            settings.seed,
            index,
        )?;
        log::info!("Frame {} rendered in {:?}", index, start.elapsed());

        let path = output::frame_path(&settings.output, index, settings.frames, format);
        output::save(&image, &path, format)?;
        log::info!("Saved {}", path.display());
    }

    log::info!("Done in {:?}", total.elapsed());
    Ok(())
}
