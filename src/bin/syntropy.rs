use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use rand::{SeedableRng, rngs::StdRng};

use syntropy::{
    Accent, BackendKind, DiagramMode, DisplayOptions, FeatureVector, FfmpegSink, FfmpegSinkOpts,
    GalleryOptions, GapCurve, Identifier, IdentityName, IntroReveal, RenderBackend, StillFormat,
    StudioConfig, compose_diagram, compose_frame, create_backend, gallery_label, record_intro,
    record_travel, render_gallery, save_frame, simulate_travel,
};

#[derive(Parser, Debug)]
#[command(name = "syntropy", version)]
struct Cli {
    /// Studio configuration JSON.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Font used for canvas labels (overrides config and SYNTROPY_FONT).
    #[arg(long, global = true)]
    font: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the name, label and binary string of an identifier.
    Name(NameArgs),
    /// Render the full composition as a JPEG or PNG.
    Render(RenderArgs),
    /// Render a 270x270 diagram tile.
    Diagram(DiagramArgs),
    /// Simulate a travel; optionally record it as MP4 and write its cue track.
    Travel(TravelArgs),
    /// Record the intro reveal as MP4 (requires `ffmpeg` on PATH).
    Intro(IntroArgs),
    /// Gallery helpers.
    #[command(subcommand)]
    Gallery(GalleryCommand),
}

#[derive(Parser, Debug)]
struct NameArgs {
    /// Identifier in [0, 8191].
    id: String,

    /// Print JSON instead of text.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug, Clone)]
struct LookArgs {
    /// Draw the grid overlay.
    #[arg(long)]
    grid: bool,

    /// Use the ember accent instead of white.
    #[arg(long)]
    ember: bool,
}

impl LookArgs {
    fn options(&self) -> DisplayOptions {
        DisplayOptions {
            accent: if self.ember {
                Accent::Ember
            } else {
                Accent::White
            },
            show_grid: self.grid,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Identifier to render; random when omitted.
    #[arg(long)]
    id: Option<String>,

    /// Seed for the random identifier.
    #[arg(long)]
    seed: Option<u64>,

    /// Output path (.jpg/.jpeg/.png). Defaults to `syntropy-<id>.jpg`.
    #[arg(long)]
    out: Option<PathBuf>,

    #[command(flatten)]
    look: LookArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeChoice {
    Squares,
    Diamonds,
    Combined,
}

impl From<ModeChoice> for DiagramMode {
    fn from(choice: ModeChoice) -> Self {
        match choice {
            ModeChoice::Squares => DiagramMode::Squares,
            ModeChoice::Diamonds => DiagramMode::Diamonds,
            ModeChoice::Combined => DiagramMode::Combined,
        }
    }
}

#[derive(Parser, Debug)]
struct DiagramArgs {
    #[arg(long, default_value = "7857")]
    id: String,

    #[arg(long, value_enum, default_value_t = ModeChoice::Combined)]
    mode: ModeChoice,

    /// Output path (.jpg/.jpeg/.png).
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct TravelArgs {
    /// Starting identifier; random when omitted.
    #[arg(long)]
    from: Option<String>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write an MP4 of the travel.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Write the cue track as JSON.
    #[arg(long)]
    cues: Option<PathBuf>,

    #[command(flatten)]
    look: LookArgs,
}

#[derive(Parser, Debug)]
struct IntroArgs {
    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Subcommand, Debug)]
enum GalleryCommand {
    /// Print the accessible label recovered from each file name.
    Label(GalleryLabelArgs),
    /// Render many compositions in parallel.
    Render(GalleryRenderArgs),
}

#[derive(Parser, Debug)]
struct GalleryLabelArgs {
    /// File names such as `syntropy-5290.jpg`, or gallery directories to list.
    #[arg(required = true)]
    names: Vec<String>,
}

#[derive(Parser, Debug)]
struct GalleryRenderArgs {
    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Comma-separated identifiers.
    #[arg(long, value_delimiter = ',')]
    ids: Vec<String>,

    /// Number of random identifiers to add.
    #[arg(long, default_value_t = 0)]
    count: usize,

    #[arg(long)]
    seed: Option<u64>,

    /// Override rayon worker threads.
    #[arg(long)]
    threads: Option<usize>,

    /// Write PNG instead of JPEG.
    #[arg(long)]
    png: bool,

    #[command(flatten)]
    look: LookArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = load_config(cli.config.as_deref(), cli.font)?;
    match cli.cmd {
        Command::Name(args) => cmd_name(args),
        Command::Render(args) => cmd_render(args, &cfg),
        Command::Diagram(args) => cmd_diagram(args, &cfg),
        Command::Travel(args) => cmd_travel(args, &cfg),
        Command::Intro(args) => cmd_intro(args, &cfg),
        Command::Gallery(GalleryCommand::Label(args)) => cmd_gallery_label(args),
        Command::Gallery(GalleryCommand::Render(args)) => cmd_gallery_render(args, &cfg),
    }
}

fn load_config(path: Option<&Path>, font: Option<PathBuf>) -> anyhow::Result<StudioConfig> {
    let cfg = match path {
        Some(p) => StudioConfig::load(p).with_context(|| format!("load config '{}'", p.display()))?,
        None => StudioConfig::default(),
    };
    let mut cfg = cfg.with_env_overrides();
    if font.is_some() {
        cfg.font = font;
    }
    if cfg.font.is_none() {
        tracing::info!("no label font configured; compositions are rendered without labels");
    }
    Ok(cfg)
}

fn parse_id(raw: &str) -> anyhow::Result<Identifier> {
    Identifier::parse_decimal(raw)
        .with_context(|| format!("'{raw}' is not an identifier in [0, 8191]"))
}

fn rng_for(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

fn make_backend(cfg: &StudioConfig) -> anyhow::Result<Box<dyn RenderBackend>> {
    let settings = cfg.render_settings().context("prepare render settings")?;
    Ok(create_backend(BackendKind::Cpu, &settings)?)
}

fn cmd_name(args: NameArgs) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let name = IdentityName::of(id);
    if args.json {
        let out = serde_json::json!({
            "id": id,
            "label": id.label(),
            "name": name.to_string(),
            "binary": id.binary_string(),
            "features": FeatureVector::of(id),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{} {} {}", id.label(), name, id.binary_string());
    }
    Ok(())
}

fn cmd_render(args: RenderArgs, cfg: &StudioConfig) -> anyhow::Result<()> {
    let id = match args.id.as_deref() {
        Some(raw) => parse_id(raw)?,
        None => Identifier::random(&mut rng_for(args.seed)),
    };
    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(syntropy::export_file_name(id)));
    let format = StillFormat::from_path(&out, cfg.jpeg_quality)?;

    let mut backend = make_backend(cfg)?;
    let frame = backend.render_scene(&compose_frame(id, &args.look.options()))?;
    save_frame(&frame, &out, format).with_context(|| format!("write '{}'", out.display()))?;

    eprintln!("wrote {} ({} {})", out.display(), id.label(), IdentityName::of(id));
    Ok(())
}

fn cmd_diagram(args: DiagramArgs, cfg: &StudioConfig) -> anyhow::Result<()> {
    let id = parse_id(&args.id)?;
    let format = StillFormat::from_path(&args.out, cfg.jpeg_quality)?;
    let mut backend = make_backend(cfg)?;
    let scene = compose_diagram(&FeatureVector::of(id), args.mode.into());
    let frame = backend.render_scene(&scene)?;
    save_frame(&frame, &args.out, format)
        .with_context(|| format!("write '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_travel(args: TravelArgs, cfg: &StudioConfig) -> anyhow::Result<()> {
    let mut rng = rng_for(args.seed);
    let from = match args.from.as_deref() {
        Some(raw) => parse_id(raw)?,
        None => Identifier::random(&mut rng),
    };
    let (steps, cues) = simulate_travel(GapCurve::standard(), from, &mut rng);
    let landing = steps.last().map(|s| s.identifier).unwrap_or(from);

    if let Some(path) = args.cues.as_ref() {
        let json = serde_json::to_string_pretty(&cues)?;
        std::fs::write(path, json).with_context(|| format!("write '{}'", path.display()))?;
        eprintln!("wrote {}", path.display());
    }

    if let Some(out) = args.out.as_ref() {
        let mut backend = make_backend(cfg)?;
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out));
        let frames = record_travel(
            &steps,
            &args.look.options(),
            backend.as_mut(),
            &mut sink,
            &cfg.record_config()?,
        )?;
        eprintln!("wrote {} ({frames} frames)", out.display());
    }

    println!(
        "{} -> {} {}",
        from.label(),
        landing.label(),
        IdentityName::of(landing)
    );
    Ok(())
}

fn cmd_intro(args: IntroArgs, cfg: &StudioConfig) -> anyhow::Result<()> {
    let target = Identifier::new(cfg.intro_target)?;
    let steps = IntroReveal::new(target, GapCurve::standard())?.simulate();

    // Labels are never drawn on intro tiles.
    let settings = syntropy::RenderSettings {
        pixel_density: cfg.pixel_density,
        font: None,
    };
    let mut backend = create_backend(BackendKind::Cpu, &settings)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&args.out));
    let frames = record_intro(
        &steps,
        cfg.intro_tile_size,
        backend.as_mut(),
        &mut sink,
        &cfg.record_config()?,
    )?;

    eprintln!("wrote {} ({frames} frames)", args.out.display());
    Ok(())
}

fn cmd_gallery_label(args: GalleryLabelArgs) -> anyhow::Result<()> {
    let mut names = Vec::new();
    for arg in &args.names {
        let path = Path::new(arg);
        if path.is_dir() {
            let mut entries = std::fs::read_dir(path)
                .with_context(|| format!("list gallery directory '{}'", path.display()))?
                .filter_map(|entry| entry.ok())
                .filter(|entry| entry.path().is_file())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect::<Vec<_>>();
            entries.sort();
            names.extend(entries);
        } else {
            names.push(arg.clone());
        }
    }

    for name in &names {
        match gallery_label(name) {
            Some(label) => println!("{name}\t{label}"),
            None => tracing::warn!(name = %name, "no identifier in file name"),
        }
    }
    Ok(())
}

fn cmd_gallery_render(args: GalleryRenderArgs, cfg: &StudioConfig) -> anyhow::Result<()> {
    let mut ids = args
        .ids
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .map(|raw| parse_id(raw))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let mut rng = rng_for(args.seed);
    ids.extend((0..args.count).map(|_| Identifier::random(&mut rng)));
    if ids.is_empty() {
        anyhow::bail!("nothing to render: pass --ids and/or --count");
    }

    let opts = GalleryOptions {
        display: args.look.options(),
        format: if args.png {
            StillFormat::Png
        } else {
            cfg.still_format()
        },
        threads: args.threads,
    };
    let settings = cfg.render_settings()?;
    let paths = render_gallery(&ids, &args.out_dir, &settings, &opts)?;

    eprintln!("wrote {} images to {}", paths.len(), args.out_dir.display());
    Ok(())
}
