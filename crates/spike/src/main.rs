use anyhow::{bail, Context, Result};
use clap::Parser;
use ripple_core::run::RippleRun;
use ripple_core::texture::TextureSource;
use ripple_core::{Image, RunConfig};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the ripple simulation headless and report per-frame metrics as JSON.
#[derive(Parser, Debug)]
#[command(name = "ripple", version)]
struct Args {
    /// JSON run configuration; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value_t = 300)]
    frames: usize,

    #[arg(long, default_value_t = 10)]
    sample_every: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Frames per second of the simulated renderer.
    #[arg(long)]
    fps: Option<f32>,

    /// Minimum seconds between disturbances.
    #[arg(long)]
    interval: Option<f32>,

    /// Side of the generated checkerboard texture (power of two).
    #[arg(long, default_value_t = 128)]
    texture_size: u32,

    /// Use the 64x64 grid instead of 128x128.
    #[arg(long)]
    small_grid: bool,

    /// Write the summary here instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the final distorted block as an ASCII PGM image.
    #[arg(long)]
    pgm: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<RunConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => RunConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if let Some(fps) = args.fps {
        if !(fps > 0.0) {
            bail!("--fps must be positive, got {fps}");
        }
        config.frame_interval = 1.0 / fps;
    }
    if let Some(interval) = args.interval {
        config.disturbance_interval = interval;
    }
    config.validate().context("invalid run configuration")?;
    Ok(config)
}

fn write_pgm(path: &Path, pixels: &[u16], side: usize) -> Result<()> {
    let mut text = format!("P2\n{side} {side}\n65535\n");
    for row in pixels.chunks(side) {
        let line: Vec<String> = row.iter().map(|p| p.to_string()).collect();
        writeln!(text, "{}", line.join(" "))?;
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))
}

fn simulate<const BITS: u32>(args: &Args, config: RunConfig, texture: Image) -> Result<()> {
    let mut run = RippleRun::<_, BITS>::try_new(config, texture)?;
    let summary = run.try_run(args.frames, args.sample_every)?;
    let json = summary.to_json_pretty()?;
    match &args.out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        }
        None => println!("{json}"),
    }
    if let Some(path) = &args.pgm {
        let block = run.field().cache_block();
        write_pgm(path, block.pixels(), block.side())?;
    }
    eprintln!(
        "{} frames on a {}x{} grid from a {}x{} texture: {} advances, {} disturbances",
        summary.frames,
        summary.grid_side,
        summary.grid_side,
        run.texture().width(),
        run.texture().height(),
        summary.stats.advances,
        summary.stats.disturbances
    );
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;
    let cell = (args.texture_size / 8).max(1);
    let texture = Image::checkerboard(args.texture_size, cell, 0x0000, 0xffff)
        .context("building checkerboard texture")?;
    if args.small_grid {
        simulate::<6>(&args, config, texture)
    } else {
        simulate::<7>(&args, config, texture)
    }
}
