use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use isoskin::{
    BatchJob, BatchOutput, BatchStats, DirTextureSource, OverlayHint, RenderConfig, TextureSource, render_batch,
    render_skin,
};

#[derive(Parser, Debug)]
#[command(name = "isoskin", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one skin PNG.
    Render(RenderArgs),
    /// Render every `*.png` skin in a directory in parallel.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Render mode: `bust` or `full_body`.
    #[arg(long)]
    mode: Option<String>,

    /// Output pixels per skin texel (1..=64).
    #[arg(long)]
    scale: Option<u32>,

    /// Force slim (3px) arms.
    #[arg(long)]
    slim: bool,

    /// Overlay handling; `auto` infers it from the texture.
    #[arg(long, value_enum)]
    overlay: Option<OverlayChoice>,

    /// JSON render config; flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input skin PNG (64x64 or 64x32).
    #[arg(long)]
    skin: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of `<identity>.png` skins (optional `<identity>.json` sidecars).
    #[arg(long)]
    dir: PathBuf,

    /// Directory receiving `<identity>.png` renders.
    #[arg(long)]
    out_dir: PathBuf,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum OverlayChoice {
    Auto,
    Present,
    Absent,
}

impl From<OverlayChoice> for OverlayHint {
    fn from(c: OverlayChoice) -> Self {
        match c {
            OverlayChoice::Auto => Self::Auto,
            OverlayChoice::Present => Self::Present,
            OverlayChoice::Absent => Self::Absent,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("isoskin=info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Batch(args) => cmd_batch(args),
    }
}

fn load_config(common: &CommonArgs) -> anyhow::Result<RenderConfig> {
    let mut cfg = match &common.config {
        Some(path) => RenderConfig::from_path(path)?,
        None => RenderConfig::default(),
    };
    if let Some(mode) = &common.mode {
        cfg.mode = mode.clone();
    }
    if let Some(scale) = common.scale {
        cfg.scale = scale;
    }
    if common.slim {
        cfg.slim = true;
    }
    if let Some(overlay) = common.overlay {
        cfg.overlay = overlay.into();
    }
    Ok(cfg)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.common)?;
    cfg.validate()?;

    let bytes = std::fs::read(&args.skin)
        .with_context(|| format!("read skin '{}'", args.skin.display()))?;
    let canvas = render_skin(&bytes, cfg.slim, cfg.overlay, cfg.render_mode()?, cfg.scale)?;
    canvas.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_batch(args: BatchArgs) -> anyhow::Result<()> {
    let mut cfg = load_config(&args.common)?;
    if args.threads.is_some() {
        cfg.threads = args.threads;
    }
    cfg.validate()?;
    let mode = cfg.render_mode()?;

    let source = DirTextureSource::new(&args.dir);
    let mut jobs = Vec::new();
    // A skin that cannot be fetched fails its own entry, like a skin that cannot be rendered.
    let mut unfetched = Vec::new();
    for id in source.identities()? {
        let texture = match source.fetch(&id) {
            Ok(texture) => texture,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "skipping skin");
                unfetched.push(BatchOutput { id, result: Err(e) });
                continue;
            }
        };
        // Flags given on the command line or in the config win over sidecar metadata.
        let overlay = if cfg.overlay != OverlayHint::Auto {
            cfg.overlay
        } else {
            texture.overlay
        };
        jobs.push(BatchJob {
            id,
            bytes: texture.bytes,
            slim: cfg.slim || texture.slim,
            overlay,
            mode,
            scale: cfg.scale,
        });
    }

    let mut outputs = render_batch(&jobs, &cfg.batch_opts())?;
    outputs.extend(unfetched);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    for out in &outputs {
        match &out.result {
            Ok(canvas) => canvas.save_png(&args.out_dir.join(format!("{}.png", out.id)))?,
            Err(e) => eprintln!("{}: {e}", out.id),
        }
    }

    let stats = BatchStats::from_outputs(&outputs);
    eprintln!(
        "rendered {}/{} skins into {}",
        stats.rendered,
        stats.jobs,
        args.out_dir.display()
    );
    if stats.failed > 0 {
        anyhow::bail!("{} of {} skins failed to render", stats.failed, stats.jobs);
    }
    Ok(())
}
