use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use paintlapse::{
    DigestSink, EventSource, Fps, FrameIndex, JsonEventLog, RenderOpts, Rgb8, Timelapse,
    TimelapseSettings,
};

#[derive(Parser, Debug)]
#[command(name = "paintlapse", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one MP4 per day (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Render a single frame of one day as a PNG.
    Frame(FrameArgs),
    /// Print one SHA-256 per day, covering that day's whole frame sequence.
    Digest(DigestArgs),
}

#[derive(Args, Debug)]
struct SettingsArgs {
    /// Output pixels per canvas pixel.
    #[arg(long, default_value_t = 5)]
    scale_factor: u32,

    /// Output frame rate: `30`, `30000/1001` or `29.97`.
    #[arg(long, default_value = "30")]
    frame_rate: Fps,

    /// Video length in seconds.
    #[arg(long, default_value_t = 30.0)]
    duration: f64,

    /// Color of unpainted cells.
    #[arg(long, default_value = "#000000")]
    background: Rgb8,
}

impl SettingsArgs {
    fn to_settings(&self) -> TimelapseSettings {
        TimelapseSettings {
            scale_factor: self.scale_factor,
            fps: self.frame_rate,
            duration_secs: self.duration,
            background: self.background,
        }
    }
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input event-log JSON.
    #[arg(long)]
    events: PathBuf,

    /// Output directory.
    #[arg(long, default_value = "./output")]
    output: PathBuf,

    /// Render only this day; all days when omitted.
    #[arg(long)]
    day: Option<u32>,

    #[command(flatten)]
    settings: SettingsArgs,

    /// Render days concurrently.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,

    /// Fail instead of replacing existing videos.
    #[arg(long, default_value_t = false)]
    no_overwrite: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input event-log JSON.
    #[arg(long)]
    events: PathBuf,

    /// Day to render.
    #[arg(long)]
    day: u32,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    #[command(flatten)]
    settings: SettingsArgs,
}

#[derive(Parser, Debug)]
struct DigestArgs {
    /// Input event-log JSON.
    #[arg(long)]
    events: PathBuf,

    /// Digest only this day; all days when omitted.
    #[arg(long)]
    day: Option<u32>,

    #[command(flatten)]
    settings: SettingsArgs,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Digest(args) => cmd_digest(args),
    }
}

fn load_source(path: &Path) -> anyhow::Result<JsonEventLog> {
    JsonEventLog::from_path(path).with_context(|| format!("load events '{}'", path.display()))
}

fn select_days(source: &JsonEventLog, day: Option<u32>) -> anyhow::Result<Vec<u32>> {
    match day {
        Some(d) => Ok(vec![d]),
        None => Ok(source.days()?),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let source = load_source(&args.events)?;
    let days = select_days(&source, args.day)?;
    let settings = args.settings.to_settings();
    let opts = RenderOpts {
        parallel: args.parallel,
        threads: args.threads,
        overwrite: !args.no_overwrite,
    };

    let outcomes =
        paintlapse::render_days_to_mp4(&source, &days, &settings, &args.output, &opts)?;

    let mut failed = 0usize;
    for outcome in &outcomes {
        match &outcome.result {
            Ok(report) => eprintln!("wrote {}", report.out_path.display()),
            // Only a full-log run may skip empty days; an explicit `--day` must render.
            Err(_) if outcome.is_skipped() && args.day.is_none() => {}
            Err(e) => {
                failed += 1;
                eprintln!("day {} failed: {e}", outcome.day);
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} days failed", outcomes.len());
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let source = load_source(&args.events)?;
    let log = source.load_day(args.day)?;
    let settings = args.settings.to_settings();
    let timelapse = Timelapse::new(&log, &settings)?;

    let frame = timelapse.render_frame(FrameIndex(args.frame))?;
    frame.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_digest(args: DigestArgs) -> anyhow::Result<()> {
    let source = load_source(&args.events)?;
    let days = select_days(&source, args.day)?;
    let settings = args.settings.to_settings();
    settings.validate()?;

    let mut failed = 0usize;
    for &day in &days {
        let digest = source.load_day(day).and_then(|log| {
            let timelapse = Timelapse::new(&log, &settings)?;
            let mut sink = DigestSink::new();
            timelapse.render_to(&mut sink)?;
            Ok(sink.hex_digest().unwrap_or_default().to_owned())
        });
        match digest {
            Ok(hex) => println!("{day}\t{hex}"),
            Err(e) if e.is_empty_day() && args.day.is_none() => {
                tracing::warn!(day, "skipping day without events")
            }
            Err(e) => {
                failed += 1;
                eprintln!("day {day} failed: {e}");
            }
        }
    }
    if failed > 0 {
        anyhow::bail!("{failed} of {} days failed", days.len());
    }
    Ok(())
}
