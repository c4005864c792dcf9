//! Command-line renderer for fractal lightning.
//!
//! Generates strikes with `bolt-core` and draws them over a background,
//! writing either a single still image or a strobing GIF animation.

mod canvas;
mod output;
mod settings;

use std::path::PathBuf;

use anyhow::Context;
use bolt_core::scene;
use clap::Parser;
use image::Rgb;
use rand::{Rng, SeedableRng, rngs::StdRng};
use settings::Settings;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bolt-render")]
#[command(version)]
#[command(about = "Render fractal lightning strikes to an image or animated GIF", long_about = None)]
struct Cli {
    /// Settings file (TOML) with [render], [generator] and [bounds] tables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Background image, overrides the settings file
    #[arg(short, long)]
    background: Option<PathBuf>,

    /// Output path (defaults to lightning.jpg, or lightning.gif with --animate)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Render a flash animation instead of a still
    #[arg(short, long)]
    animate: bool,

    /// Number of flash frames, overrides the settings file
    #[arg(short, long)]
    frames: Option<u32>,

    /// Random seed for reproducibility
    #[arg(short, long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(background) = cli.background {
        settings.render.background = Some(background);
    }
    if let Some(frames) = cli.frames {
        settings.generator.frame_count = frames;
    }

    let cfg = settings
        .generator
        .sanitized()
        .context("invalid [generator] settings")?;
    let background = output::load_background(&settings.render)?;
    let bounds = settings.bounds_for(background.width(), background.height());
    let color = Rgb(settings.render.color);

    let seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    log::info!("seed {seed}");
    let mut rng = StdRng::seed_from_u64(seed);

    if cli.animate {
        let frames = scene::compose_animation(&bounds, &cfg, &mut rng)?;
        let images = canvas::render_frames(&background, &frames, color);
        let path = cli.output.unwrap_or_else(|| PathBuf::from("lightning.gif"));
        output::save_animation(&images, settings.render.frame_delay_ms, &path)?;
    } else {
        let strike = scene::compose_still(&bounds, &cfg, &mut rng)?;
        log::info!(
            "strike with {} branches, {} segments",
            strike.branches().len(),
            strike.segment_count()
        );
        let image = canvas::render_scene(&background, &strike, color);
        let path = cli.output.unwrap_or_else(|| PathBuf::from("lightning.jpg"));
        output::save_still(&image, &path)?;
    }

    Ok(())
}
