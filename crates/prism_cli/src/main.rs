//! Prism CLI - render a built-in scene to an image file.

mod config;
mod scenes;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use config::Overrides;
use scenes::SceneKind;

/// Prism - a recursive ray tracer
#[derive(Parser)]
#[command(name = "prism")]
#[command(about = "Render a demo scene with the Prism ray tracer")]
struct Cli {
    /// JSON render settings; missing fields use defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Scene to render
    #[arg(long, value_enum, default_value_t = SceneKind::Spheres)]
    scene: SceneKind,

    /// Output image (.png or .ppm)
    #[arg(short, long, default_value = "prism.png")]
    output: PathBuf,

    /// Image width in pixels
    #[arg(long)]
    width: Option<u32>,

    /// Image height in pixels
    #[arg(long)]
    height: Option<u32>,

    /// Samples per pixel
    #[arg(short, long)]
    samples: Option<u32>,

    /// Maximum reflection/refraction depth
    #[arg(short, long)]
    depth: Option<u32>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            samples: self.samples,
            depth: self.depth,
            seed: self.seed,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();

    let config = cli.overrides().apply(config::load(cli.config.as_deref())?);
    log::info!("Starting Prism: {:?} scene -> {}", cli.scene, cli.output.display());
    log::debug!("Render config: {}", serde_json::to_string(&config)?);

    let start = Instant::now();
    let (world, camera) = scenes::build(cli.scene, &config).context("Failed to build scene")?;
    log::info!("Scene built in {:.2?}", start.elapsed());

    let image = prism_renderer::render(&camera, &world, &config);
    image
        .save(&cli.output)
        .with_context(|| format!("Failed to write {}", cli.output.display()))?;

    Ok(())
}
