use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "depthscan", version)]
struct Cli {
    /// Log debug events to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame at an explicit time as a PNG.
    Frame(FrameArgs),
    /// Render a numbered PNG sequence.
    Sequence(SequenceArgs),
    /// Print a scene config with every default filled in.
    Defaults,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Scene JSON.
    #[arg(long)]
    config: PathBuf,

    /// Elapsed seconds.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Normalized pointer `X,Y`; defaults to the scene's pointer path.
    #[arg(long, value_parser = parse_pointer, allow_hyphen_values = true)]
    pointer: Option<[f64; 2]>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct SequenceArgs {
    /// Scene JSON.
    #[arg(long)]
    config: PathBuf,

    /// Output directory for `frame_NNNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,

    /// First frame (inclusive).
    #[arg(long, default_value_t = 0)]
    start: u64,

    /// Last frame (exclusive); defaults to the scene duration.
    #[arg(long)]
    end: Option<u64>,

    /// Enable frame-level parallelism.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Render chunk size.
    #[arg(long, default_value_t = 64)]
    chunk_size: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Sequence(args) => cmd_sequence(args),
        Command::Defaults => cmd_defaults(),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn parse_pointer(s: &str) -> Result<[f64; 2], String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{s}'"))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid pointer component '{v}': {e}"))
    };
    Ok([parse(x)?, parse(y)?])
}

fn load_scene(path: &Path) -> anyhow::Result<(depthscan::SceneConfig, depthscan::SourceImages)> {
    let cfg = depthscan::SceneConfig::from_path(path)?;
    cfg.validate()?;
    let root = path.parent().unwrap_or_else(|| Path::new("."));
    let images = cfg.load_images(root)?;
    Ok((cfg, images))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, images) = load_scene(&args.config)?;
    let rasterizer = cfg.rasterizer()?;

    let clock = depthscan::FrameClock::at_secs(args.time);
    let pointer = match args.pointer {
        Some([x, y]) => depthscan::Vec2::new(x, y),
        None => cfg.pointer.sample(clock.elapsed_secs()),
    };
    let uniforms = depthscan::Uniforms {
        pointer,
        progress: clock.progress(),
    };
    let frame = rasterizer.render(&images, uniforms, None)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    depthscan::encode::png::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_sequence(args: SequenceArgs) -> anyhow::Result<()> {
    let (cfg, images) = load_scene(&args.config)?;
    let rasterizer = cfg.rasterizer()?;

    let end = args.end.unwrap_or(cfg.duration);
    let range = depthscan::FrameRange::new(
        depthscan::FrameIndex(args.start),
        depthscan::FrameIndex(end),
    )?;
    let job = depthscan::RenderJob {
        rasterizer: &rasterizer,
        images: &images,
        pointer: cfg.pointer,
        fps: cfg.fps,
    };
    let threading = depthscan::RenderThreading {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
    };

    let mut sink = depthscan::PngSequenceSink::new(&args.out_dir);
    let stats = depthscan::render_to_sink(&job, range, &threading, &mut sink)?;

    eprintln!(
        "wrote {} frames to {}",
        stats.frames_rendered,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_defaults() -> anyhow::Result<()> {
    let cfg = depthscan::SceneConfig::with_images("color.png", "depth.png");
    let json = serde_json::to_string_pretty(&cfg).context("serialize default scene")?;
    println!("{json}");
    Ok(())
}
