//! wl-rdp-input-replay - Input trace replay
//!
//! Entry point for the replay binary.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wl_rdp_input::config::Config;
use wl_rdp_input::input::{InputTranslator, RecordedEvent, RecordingSink};
use wl_rdp_input::replay::{replay_trace_with, ReplayOptions, ReplayReport};

/// How wire events are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One human-readable line per event
    Text,
    /// One JSON object per line
    Json,
}

/// Command-line arguments for wl-rdp-input-replay
#[derive(Parser, Debug)]
#[command(name = "wl-rdp-input-replay")]
#[command(version, about = "Replay Wayland input traces into RDP input PDUs", long_about = None)]
struct Args {
    /// JSON-lines trace of Wayland input events
    trace: PathBuf,

    /// Configuration file path
    #[arg(short, long, env = "WL_RDP_INPUT_CONFIG")]
    config: Option<String>,

    /// Enable keyboard grab mode
    #[arg(long)]
    grab_keyboard: bool,

    /// Attach a multi-touch channel instead of emulating touch as mouse
    #[arg(long)]
    touch_channel: bool,

    /// Keep replaying after a session-fatal error
    #[arg(long)]
    keep_going: bool,

    /// Output format for wire events
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long)]
    log_format: Option<String>,

    /// Write logs to file (in addition to stderr)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config()?,
    };
    let config = config.with_overrides(
        args.grab_keyboard,
        args.touch_channel,
        args.log_format.clone(),
        args.log_file.clone(),
    );
    config.validate()?;

    init_logging(&args, &config)?;

    info!("wl-rdp-input-replay v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {} {}", env!("BUILD_DATE"), env!("BUILD_TIME"));
    info!("  Commit: {}", env!("GIT_HASH"));
    tracing::debug!("Config: {:?}", config);

    match run(&args, &config) {
        Ok(report) if report.stopped_at.is_some() => {
            std::process::exit(1);
        }
        Ok(_) => Ok(()),
        Err(e) => {
            eprintln!("{}", wl_rdp_input::utils::format_user_error(&e));
            Err(e)
        }
    }
}

fn run(args: &Args, config: &Config) -> Result<ReplayReport> {
    let file = File::open(&args.trace)
        .context(format!("Failed to open trace: {}", args.trace.display()))?;

    let sink = RecordingSink::new();
    let mut translator =
        InputTranslator::new(Box::new(config.scaler()), config.translator_options());
    translator.attach_sink(Box::new(sink.clone()));
    translator.set_seat(Some(Box::new(sink.clone())));
    if config.input.touch_channel {
        translator.set_touch_channel(Some(Box::new(sink.touch_channel())));
    }

    let options = ReplayOptions {
        keep_going: args.keep_going,
    };
    let report = replay_trace_with(BufReader::new(file), &mut translator, options)?;

    for event in sink.take_events() {
        print_event(&event, args.output)?;
    }

    for failure in &report.failures {
        eprintln!(
            "line {}: {}{}",
            failure.line,
            failure.error,
            if failure.fatal { " (session-fatal)" } else { "" }
        );
    }
    if let Some(line) = report.stopped_at {
        eprintln!("Replay stopped at line {}; use --keep-going to continue", line);
    }

    Ok(report)
}

fn print_event(event: &RecordedEvent, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(event)?);
        }
        OutputFormat::Text => match *event {
            RecordedEvent::Mouse { flags, x, y } => {
                println!("mouse          flags=0x{:04X} x={} y={}", flags, x, y)
            }
            RecordedEvent::ExtendedMouse { flags, x, y } => {
                println!("extended_mouse flags=0x{:04X} x={} y={}", flags, x, y)
            }
            RecordedEvent::Keyboard { pressed, scancode } => println!(
                "keyboard       {} scancode=0x{:03X}",
                if pressed { "down" } else { "up  " },
                scancode
            ),
            RecordedEvent::FocusIn { lock_flags } => {
                println!("focus_in       locks=0x{:04X}", lock_flags)
            }
            RecordedEvent::TouchBegin { id, x, y } => {
                println!("touch_begin    id={} x={} y={}", id, x, y)
            }
            RecordedEvent::TouchUpdate { id, x, y } => {
                println!("touch_update   id={} x={} y={}", id, x, y)
            }
            RecordedEvent::TouchEnd { id, x, y } => {
                println!("touch_end      id={} x={} y={}", id, x, y)
            }
            RecordedEvent::InhibitShortcuts { inhibit } => {
                println!("inhibit        {}", inhibit)
            }
        },
    }
    Ok(())
}

fn init_logging(args: &Args, config: &Config) -> Result<()> {
    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "wl_rdp_input={level},wl_rdp_input_replay={level},warn",
            level = log_level
        ))
    });

    // Logs go to stderr; stdout carries the wire events.
    if let Some(log_file_path) = &config.logging.file {
        let file = File::create(log_file_path)
            .context(format!("Failed to create log file: {}", log_file_path.display()))?;

        match config.logging.format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .with(
                        tracing_subscriber::fmt::layer()
                            .with_writer(file)
                            .with_ansi(false),
                    )
                    .init();
            }
        }
        info!("Logging to file: {}", log_file_path.display());
    } else {
        match config.logging.format.as_str() {
            "json" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .json()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            "compact" => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .compact()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(
                        tracing_subscriber::fmt::layer()
                            .pretty()
                            .with_writer(std::io::stderr),
                    )
                    .init();
            }
        }
    }

    Ok(())
}
