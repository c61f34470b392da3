//! co2vent — command-line entry point.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  Adapters (outer ring)                   │
//! │  HubSession        LogEventSink   ThreadDelay            │
//! │  (Relay+CO2 ports) (EventSink)    (DelayNs)              │
//! │  ConsolePrompt (PromptPort)                              │
//! │                                                          │
//! │  ──────────────── Port Trait Boundary ─────────────      │
//! │                                                          │
//! │  ┌────────────────────────────────────────────────────┐  │
//! │  │  Controller: ZoneRegistry · ThresholdPolicy · FSM  │  │
//! │  └────────────────────────────────────────────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is returned up to [`main`], which prints it and exits
//! non-zero.  The hub session is dropped before that, on every path.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use co2vent::adapters::console::ConsolePrompt;
use co2vent::adapters::hardware::HubSession;
use co2vent::adapters::log_sink::LogEventSink;
use co2vent::adapters::time::ThreadDelay;
use co2vent::app::commands::AppCommand;
use co2vent::app::service::{CommandOutcome, Controller};
use co2vent::config::ControllerConfig;

#[derive(Parser, Debug)]
#[command(
    name = "co2vent",
    about = "Open and close Velux roof windows from a Yoctopuce CO2 sensor",
    version
)]
struct Cli {
    /// Command to execute: open, close, auto, co2 or bind
    command: AppCommand,

    /// Zone to act on (repeatable). Omitted or "All" targets every zone
    #[arg(long = "zone", value_name = "NAME")]
    zones: Vec<String>,

    /// Configuration file in JSON format
    #[arg(short, long, default_value = "config.json", env = "CO2VENT_CONFIG")]
    config: PathBuf,

    /// Increase output verbosity
    #[arg(short, long)]
    verbose: bool,

    /// Reset the min and max values of the CO2 sensor before running
    #[arg(long = "reset_min_max")]
    reset_min_max: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_level = match (cli.verbose, cli.command) {
        (true, _) => LevelFilter::DEBUG,
        (false, AppCommand::Auto) => LevelFilter::INFO,
        (false, _) => LevelFilter::WARN,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy(),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    debug!("{cli:?}");
    let config = ControllerConfig::load(&cli.config)?;

    let session = HubSession::register(&config.yoctohubs)?;
    let mut controller = Controller::from_config(&config, &cli.zones, &session)?;

    let mut delay = ThreadDelay;
    let mut sink = LogEventSink::new();
    let mut prompt = ConsolePrompt::stdio();

    if cli.reset_min_max {
        controller
            .reset_min_max(&mut sink)
            .context("resetting CO2 min/max")?;
    }

    let outcome = controller
        .execute(cli.command, &mut delay, &mut sink, &mut prompt)
        .with_context(|| format!("running {}", cli.command))?;
    if let CommandOutcome::Report(snapshot) = outcome {
        println!("{snapshot}");
    }
    Ok(())
}
