// wavepreview - Render the wave field headlessly to PNG frames
//
// Pipeline:
//   1. Build a field for the requested size and seed
//   2. Optionally sweep a synthetic pointer across the middle
//   3. Tick at a fixed frame interval, rasterising every Nth frame
//
// Usage: cargo run --bin wavepreview -- --width 800 --height 450 --sweep

#[cfg(not(target_arch = "wasm32"))]
mod raster;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use std::path::PathBuf;

    use anyhow::Context;
    use clap::Parser;
    use wavefield_engine::surface::NoStyle;
    use wavefield_engine::{FieldConfig, WaveField};

    #[derive(Parser)]
    #[command(about = "Render wave field frames to PNG")]
    struct Args {
        #[arg(long, default_value_t = 800)]
        width: u32,
        #[arg(long, default_value_t = 450)]
        height: u32,
        #[arg(long, default_value_t = 1)]
        seed: u32,
        /// Frames to simulate
        #[arg(long, default_value_t = 120)]
        frames: u32,
        /// Milliseconds between frames
        #[arg(long, default_value_t = 16.0)]
        interval: f64,
        /// Write every Nth frame
        #[arg(long, default_value_t = 30)]
        every: u32,
        /// JSON file overriding tuning constants
        #[arg(long)]
        config: Option<PathBuf>,
        /// Drag a pointer left to right through the middle
        #[arg(long)]
        sweep: bool,
        #[arg(long, default_value = "preview")]
        out: PathBuf,
    }

    tracing_subscriber::fmt().init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            FieldConfig::from_json(&json)?
        }
        None => FieldConfig::default(),
    };

    let (w, h) = (args.width as f64, args.height as f64);
    let mut field = WaveField::new(w, h, config, args.seed)?;
    let mut surface = raster::Raster::new(args.width, args.height);
    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;

    tracing::info!(
        width = args.width,
        height = args.height,
        seed = args.seed,
        cols = field.grid().cols(),
        rows = field.grid().rows(),
        "rendering {} frames",
        args.frames
    );

    let every = args.every.max(1);
    for frame in 0..args.frames {
        if args.sweep {
            let t = frame as f64 / args.frames.max(1) as f64;
            field.pointer_move(w * t, h / 2.0);
        }
        field.tick(frame as f64 * args.interval, &mut surface, &mut NoStyle);

        if frame % every == 0 || frame + 1 == args.frames {
            let path = args.out.join(format!("frame_{frame:04}.png"));
            surface
                .img
                .save(&path)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::debug!(path = %path.display(), "frame written");
        }
    }

    tracing::info!(out = %args.out.display(), "done");
    Ok(())
}

#[cfg(target_arch = "wasm32")]
fn main() {}
