use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use schedreel::pipeline::{build_animator, build_schedule};
use schedreel::scheduler::clock::install_signal_handler;
use schedreel::{
    CycleOutcome, ReelConfig, SchedulePipeline, Scheduler, Shutdown, SystemClock,
};

#[derive(Parser, Debug)]
#[command(name = "schedreel", version)]
struct Cli {
    /// Configuration JSON; built-in defaults when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (honours `RUST_LOG`).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Publish now if nothing is published, then regenerate on every trigger until interrupted.
    Run,
    /// Generate and publish once.
    Once,
    /// Render one preview frame of a local schedule file as a PNG.
    Frame(FrameArgs),
    /// Parse and normalize a local schedule file and print the result.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Schedule document (HTML or JSON per config).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Seconds from the start of the video.
    #[arg(long, default_value_t = 0.0)]
    at: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Instant treated as "now" (RFC 3339); the current time when omitted.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Schedule document (HTML or JSON per config).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Instant treated as "now" (RFC 3339); the current time when omitted.
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    schedreel::logging::init(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    match cli.cmd {
        Command::Run => cmd_run(config),
        Command::Once => cmd_once(config),
        Command::Frame(args) => cmd_frame(&config, args),
        Command::Check(args) => cmd_check(&config, args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ReelConfig> {
    let config = match path {
        Some(p) => ReelConfig::from_path(p)?,
        None => ReelConfig::default(),
    };
    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn scheduler(
    config: ReelConfig,
) -> anyhow::Result<Scheduler<SchedulePipeline, SystemClock>> {
    let opts = config.scheduler_options();
    let pipeline = SchedulePipeline::new(config)?;
    Ok(Scheduler::new(pipeline, SystemClock, opts)?)
}

fn cmd_run(config: ReelConfig) -> anyhow::Result<()> {
    let shutdown = Shutdown::new();
    install_signal_handler(shutdown.clone())?;
    let cycles = scheduler(config)?.run(&shutdown);
    eprintln!("stopped after {cycles} cycle(s)");
    Ok(())
}

fn cmd_once(config: ReelConfig) -> anyhow::Result<()> {
    let published = config.output.published_path.clone();
    match scheduler(config)?.run_cycle() {
        CycleOutcome::Published => {
            eprintln!("wrote {}", published.display());
            Ok(())
        }
        CycleOutcome::Failed { stage, message } => {
            anyhow::bail!("generation failed at {stage}: {message}")
        }
    }
}

fn read_input(path: &Path) -> anyhow::Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("read schedule '{}'", path.display()))
}

fn cmd_frame(config: &ReelConfig, args: FrameArgs) -> anyhow::Result<()> {
    let body = read_input(&args.in_path)?;
    let normalized = build_schedule(config, &body, args.now.unwrap_or_else(Utc::now))?;
    let (_, animator) = build_animator(config, &normalized)?;
    let frame = animator.frame_at(args.at);

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_check(config: &ReelConfig, args: CheckArgs) -> anyhow::Result<()> {
    let body = read_input(&args.in_path)?;
    let normalized = build_schedule(config, &body, args.now.unwrap_or_else(Utc::now))?;
    let report = &normalized.report;

    println!(
        "reference date {}{}",
        report.reference_date,
        if report.date_fallback { " (fallback: today)" } else { "" }
    );
    for group in &normalized.groups {
        println!("{}", group.name);
        for event in &group.events {
            let channels = if event.channels.is_empty() {
                String::new()
            } else {
                format!(" ({})", event.channels.join(", "))
            };
            println!("  {} {}{}", event.start.format("%H:%M"), event.title, channels);
        }
    }
    println!(
        "{} events kept, {} expired, {} excluded, {} dropped",
        report.retained(),
        report.expired,
        report.excluded_categories,
        report.dropped_total()
    );
    Ok(())
}
