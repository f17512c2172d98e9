//! `stringency` command-line front end.
//!
//! Loads configuration, opens the event source, and runs one subcommand
//! against the aggregation engine. JSON results go to stdout; logs go to
//! stderr so output can be piped.
//!
//! # Startup Sequence
//!
//! 1. Parse arguments
//! 2. Load configuration from `stringency-config.yaml` (defaults if absent)
//! 3. Initialize structured logging (tracing)
//! 4. Open the event source (JSON file or seeded sample)
//! 5. Dispatch the subcommand

mod commands;
mod error;
mod frame_logger;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;
use stringency_engine::config::DashboardConfig;
use stringency_engine::playback::PlaybackControl;
use stringency_engine::AggregationEngine;
use stringency_types::{Metric, MonthKey};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::CliError;

/// Config file read when `--config` is not given.
const DEFAULT_CONFIG_PATH: &str = "stringency-config.yaml";

/// Policy stringency timelines, snapshots, and statistics.
#[derive(Parser, Debug)]
#[command(name = "stringency", version, about)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Print the navigable months for a subject.
    Timeline {
        /// Subject code, e.g. USA.
        subject: String,
    },
    /// Print the per-category snapshot at the end of a month.
    Snapshot {
        /// Subject code, e.g. USA.
        subject: String,
        /// Cutoff month as YYYY-MM.
        month: MonthKey,
    },
    /// Print active-policy counts for every month of a subject's timeline.
    Series {
        /// Subject code, e.g. USA.
        subject: String,
    },
    /// Print global totals and regions ranked by a metric.
    Stats(StatsArgs),
    /// Play a subject's timeline frame by frame.
    Play(PlayArgs),
}

#[derive(clap::Args, Debug)]
struct StatsArgs {
    /// Metric to rank by: cases, deaths, recovered, or vaccinated.
    #[arg(long, default_value = "cases")]
    metric: Metric,
}

#[derive(clap::Args, Debug)]
struct PlayArgs {
    /// Subject code, e.g. USA.
    subject: String,

    /// Milliseconds between frames (overrides the config).
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Restart from the first month after the last one.
    #[arg(long = "loop")]
    repeat: bool,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let (config, from_file) = load_config(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();

    if from_file {
        info!(path = %cli.config.display(), "Configuration loaded");
    } else {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }

    let engine = AggregationEngine::new(&config.timeline)?;

    match cli.command {
        Commands::Timeline { subject } => {
            let source = commands::open_source(&config.dataset)?;
            println!("{}", commands::timeline(&engine, &*source, &subject)?);
        }
        Commands::Snapshot { subject, month } => {
            let source = commands::open_source(&config.dataset)?;
            println!("{}", commands::snapshot(&engine, &*source, &subject, month)?);
        }
        Commands::Series { subject } => {
            let source = commands::open_source(&config.dataset)?;
            println!("{}", commands::series(&engine, &*source, &subject)?);
        }
        Commands::Stats(args) => {
            println!("{}", commands::overview(&config, args.metric)?);
        }
        Commands::Play(args) => {
            let source = commands::open_source(&config.dataset)?;
            let control = Arc::new(PlaybackControl::new(&config.playback));
            if let Some(ms) = args.interval_ms {
                if control.set_frame_interval_ms(ms).is_none() {
                    warn!(
                        requested_ms = ms,
                        frame_interval_ms = control.frame_interval_ms(),
                        "Frame interval too short, keeping configured value"
                    );
                }
            }
            if args.repeat {
                control.set_loop(true);
            }
            commands::play(&engine, &*source, &args.subject, control).await?;
        }
    }

    Ok(())
}

/// Load the dashboard configuration from `path`.
///
/// A missing file is not an error: defaults are used, with environment
/// overrides still applied. The flag reports whether the file was read.
fn load_config(path: &Path) -> Result<(DashboardConfig, bool), CliError> {
    if path.exists() {
        Ok((DashboardConfig::from_file(path)?, true))
    } else {
        Ok((DashboardConfig::parse("")?, false))
    }
}
