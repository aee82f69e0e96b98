//! sspuller - sporting-event metadata harvester
//!
//! Optionally reconciles the per-day scheduled-events indices first, then
//! replays every captured index on disk to fetch per-event details.

use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use ssp_common::config::{load_toml_config, CONFIG_PATH_ENV, DATA_ROOT_ENV};
use ssp_common::{DaysInMonth, Sport};
use ssp_puller::config::{parse_start_date, validate_year, CliOverrides, PullerSettings};
use ssp_puller::models::CalendarDay;
use ssp_puller::services::SkipRule;
use ssp_puller::workflow::scheduled_events::DEFAULT_START;
use ssp_puller::{EventDataJob, Puller, ScheduledEventsJob};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for sspuller
#[derive(Parser, Debug)]
#[command(name = "sspuller")]
#[command(about = "Harvest scheduled events and per-event details into a tar.gz tree")]
#[command(version)]
struct Args {
    /// Only export event data for this year (e.g. 2022)
    #[arg(long, value_parser = parse_year)]
    year: Option<String>,

    /// Sport to harvest (basketball, football)
    #[arg(long)]
    sport: Sport,

    /// Data folder (root of the year/month/day tree)
    #[arg(long = "data", env = DATA_ROOT_ENV)]
    data_root: Option<PathBuf>,

    /// Also pull scheduled events for every day since --start-date
    #[arg(long = "scheduled-events")]
    scheduled_events: bool,

    /// First day of the scheduled-events reconciliation (YYYY-MM-DD)
    #[arg(long, value_parser = parse_start)]
    start_date: Option<CalendarDay>,

    /// Start-year skip rule: literal (historical) or before-start
    #[arg(long, default_value = "literal")]
    skip_rule: SkipRule,

    /// Max upstream errors tolerated (non-200 non-404) per pipeline
    #[arg(long)]
    max_errors: Option<usize>,

    /// Max number of detail fetches in flight
    #[arg(long)]
    max_parallelism: Option<usize>,

    /// Re-download artifacts that already exist
    #[arg(long)]
    force: bool,

    /// Verify upstream TLS certificates
    #[arg(long)]
    verify_tls: bool,

    /// Per-request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Upstream scheme
    #[arg(long)]
    schema: Option<String>,

    /// Upstream host
    #[arg(long)]
    host: Option<String>,

    /// Bootstrap TOML file
    #[arg(long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
}

fn parse_year(value: &str) -> ssp_common::Result<String> {
    validate_year(value)
}

fn parse_start(value: &str) -> ssp_common::Result<CalendarDay> {
    parse_start_date(value, &DaysInMonth::STANDARD)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let toml_config = load_toml_config(args.config.as_deref()).context("Failed to load configuration")?;

    let cli = CliOverrides {
        data_root: args.data_root.clone(),
        schema: args.schema.clone(),
        host: args.host.clone(),
        max_errors: args.max_errors,
        max_parallelism: args.max_parallelism,
        timeout_secs: args.timeout_secs,
        verify_tls: args.verify_tls,
        force: args.force,
    };
    let settings = PullerSettings::resolve(&cli, &toml_config);
    init_tracing(&settings.log_level, toml_config.logging.file.as_deref())?;

    info!("Starting sspuller {}", env!("CARGO_PKG_VERSION"));
    info!("Build: {} ({})", env!("GIT_HASH"), env!("BUILD_TIMESTAMP"));
    info!("Data root: {}", settings.data_root.display());
    info!("Upstream: {}", settings.endpoint.base_url());

    let puller = Puller::new(&settings).context("Failed to create HTTP client")?;

    if args.scheduled_events {
        let job = ScheduledEventsJob {
            start: args.start_date.unwrap_or(DEFAULT_START),
            skip_rule: args.skip_rule,
            ..ScheduledEventsJob::new(args.sport, settings.max_errors)
        };
        if let Err(e) = puller.export_scheduled_events(&job).await {
            error!(error = %e, "failed to reconciliate event data");
            return Err(e).context("failed to reconciliate event data");
        }
    }

    let job = EventDataJob {
        year: args.year.clone(),
        max_parallelism: settings.max_parallelism,
        ..EventDataJob::new(args.sport, settings.max_errors)
    };
    if let Err(e) = puller.export_event_data(&job).await {
        error!(error = %e, "failed to export event data");
        return Err(e).context("failed to export event data");
    }

    info!("Done");
    Ok(())
}

/// `RUST_LOG` wins over the configured level
fn init_tracing(level: &str, file: Option<&std::path::Path>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("ssp_puller={level},sspuller={level},ssp_common={level}").into());

    let registry = tracing_subscriber::registry().with(filter);
    match file {
        Some(path) => {
            let log_file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(log_file)),
                )
                .init();
        }
        None => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
    Ok(())
}
