use std::path::{Path, PathBuf};

use anyhow::Context as _;
use aquarelle::session::RunSummary;
use aquarelle::sketches::{Flowers, Orbits, Shapes};
use aquarelle::{EngineConfig, RenderMode, Session, Sketch};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "aquarelle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run a built-in sketch to completion and write the final image as a PNG.
    Render(RenderArgs),
    /// Print a sketch's engine config as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Sketch to render.
    #[arg(long, value_enum, default_value_t = SketchChoice::Flowers)]
    sketch: SketchChoice,

    /// Seed for the random and noise sources. Overrides the config's seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Engine config JSON. Defaults to the sketch's preset.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Stop after this many frames even if the sketch has not settled.
    #[arg(long, default_value_t = 20_000)]
    max_frames: u64,

    /// Write the water buffer instead of the painting.
    #[arg(long)]
    water: bool,

    /// Quick preview: brush routines run to completion without simulating between strokes.
    #[arg(long)]
    draft: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    #[arg(long, value_enum, default_value_t = SketchChoice::Flowers)]
    sketch: SketchChoice,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SketchChoice {
    Flowers,
    Orbits,
    Shapes,
}

impl SketchChoice {
    fn preset(self) -> EngineConfig {
        match self {
            Self::Flowers => Flowers::preset(),
            Self::Orbits => Orbits::preset(),
            Self::Shapes => Shapes::preset(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    initialise_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    println!("{}", args.sketch.preset().to_json_pretty()?);
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_path(path)
            .with_context(|| format!("load config '{}'", path.display()))?,
        None => args.sketch.preset(),
    };
    if let Some(seed) = args.seed {
        config.seed = seed;
    }
    if args.draft {
        config.mode = RenderMode::Draft;
    }

    match args.sketch {
        SketchChoice::Flowers => render(Flowers::default(), config, &args),
        SketchChoice::Orbits => render(Orbits::default(), config, &args),
        SketchChoice::Shapes => render(Shapes::default(), config, &args),
    }
}

fn render<S: Sketch>(sketch: S, config: EngineConfig, args: &RenderArgs) -> anyhow::Result<()> {
    tracing::info!(
        sketch = sketch.name(),
        seed = config.seed,
        mode = ?config.mode,
        width = config.canvas.width,
        height = config.canvas.height,
        "rendering"
    );
    let mut session = Session::new(sketch, config)?;
    let summary: RunSummary = session.run(args.max_frames, |s| {
        if s.frame().0 % 100 == 0 {
            tracing::info!(
                frame = s.frame().0,
                pending = s.scheduler().pending(),
                "progress"
            );
        }
    })?;
    if !summary.finished {
        tracing::warn!(frames = summary.frames, "writing an unsettled image");
    }

    let image = if args.water {
        session.state().water_for_display()
    } else {
        session.display()
    };
    let canvas = image.canvas();
    write_png(&args.out, &image.to_straight_rgba8_bytes(), canvas.width, canvas.height)?;

    eprintln!(
        "wrote {} ({} frames, {} fixations)",
        args.out.display(),
        summary.frames,
        summary.fixations
    );
    Ok(())
}

fn write_png(path: &Path, rgba: &[u8], width: u32, height: u32) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        rgba,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
