// Headless front end: build or load a scene, render frames, write a PNG.
// Run with: cargo run --release -- --scene scenes/pond.json --output pond.png

use anyhow::{bail, Context, Result};
use clap::Parser;
use cubo_core::{load_scene, SceneDescription};
use cubo_math::Camera;
use cubo_renderer::{render_parallel, RayGenerator, RenderContext, TraceStats, DEFAULT_BUCKET_SIZE};
use std::path::PathBuf;
use std::time::Instant;

/// Render a block world to a PNG.
#[derive(Debug, Parser)]
#[command(name = "cubo_viewer", version)]
struct Options {
    /// Scene description (default: built-in demo world)
    #[arg(long, value_name = "PATH.json")]
    scene: Option<PathBuf>,

    /// Where to write the last frame
    #[arg(long, value_name = "PATH.png", default_value = "render.png")]
    output: PathBuf,

    /// Image resolution
    #[arg(long, value_name = "WxH", default_value = "800x600", value_parser = parse_size)]
    size: Size,

    /// Camera moves applied before rendering:
    /// u = forward, d = back, l = orbit left, r = orbit right
    #[arg(long, value_name = "KEYS", default_value = "")]
    moves: String,

    /// Frames to render for timing
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    frames: u32,

    /// Bucket edge length in pixels
    #[arg(
        long = "buckets",
        value_name = "PX",
        default_value_t = DEFAULT_BUCKET_SIZE,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    bucket_size: u32,
}

/// Image resolution in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Size {
    width: u32,
    height: u32,
}

/// Parse `<W>x<H>`.
fn parse_size(size: &str) -> Result<Size, String> {
    let (w, h) = size
        .split_once('x')
        .ok_or_else(|| format!("'{size}' is not of the form <W>x<H>"))?;
    let width: u32 = w.parse().map_err(|_| format!("bad width in '{size}'"))?;
    let height: u32 = h.parse().map_err(|_| format!("bad height in '{size}'"))?;
    if width == 0 || height == 0 {
        return Err(format!("'{size}' must be non-zero"));
    }
    Ok(Size { width, height })
}

/// Apply keyboard-style camera moves.
fn apply_moves(camera: &mut Camera, moves: &str) -> Result<()> {
    for key in moves.chars() {
        match key {
            'u' => camera.move_forward(1.0),
            'd' => camera.move_forward(-1.0),
            'l' => camera.rotate(-1.0, 0.0),
            'r' => camera.rotate(1.0, 0.0),
            other => bail!("unknown camera move '{other}' (expected u, d, l or r)"),
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let options = Options::parse();
    let Size { width, height } = options.size;

    let description = match &options.scene {
        Some(path) => load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene given, using the demo world");
            SceneDescription::demo()
        }
    };

    let rays = RayGenerator::new().with_resolution(width, height);
    let mut ctx = RenderContext::from_description(&description)
        .context("Failed to build scene")?
        .with_rays(rays);
    apply_moves(&mut ctx.camera, &options.moves)?;
    log::info!(
        "Camera at ({:.2}, {:.2}, {:.2}), {:.2} from target",
        ctx.camera.position.x,
        ctx.camera.position.y,
        ctx.camera.position.z,
        ctx.camera.distance()
    );

    log::info!(
        "Rendering {} frame(s) at {}x{}",
        options.frames,
        width,
        height
    );

    let start = Instant::now();
    let mut last = None;
    let mut total_stats = TraceStats::default();
    for frame in 0..options.frames {
        let frame_start = Instant::now();
        let (image, stats) = render_parallel(&ctx, options.bucket_size);
        log::info!(
            "Frame {} rendered in {:.1} ms ({} rays, depth {})",
            frame,
            frame_start.elapsed().as_secs_f64() * 1000.0,
            stats.rays,
            stats.max_depth_reached
        );
        total_stats.merge(stats);
        last = Some(image);
    }
    let elapsed = start.elapsed().as_secs_f64();
    log::info!(
        "FPS: {:.2} ({} rays total)",
        options.frames as f64 / elapsed,
        total_stats.rays
    );

    if let Some(image) = last {
        image
            .save_png(&options.output)
            .with_context(|| format!("Failed to write {}", options.output.display()))?;
        log::info!("Saved to {}", options.output.display());
    }

    Ok(())
}
