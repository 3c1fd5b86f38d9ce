//! `unavail` CLI - run unavailability queries over a JSON dataset.
//!
//! ## Usage
//!
//! ```sh
//! # Hourly buckets for the day containing an instant (dataset on stdin)
//! cat bookings.json | unavail hourly --at 2020-01-01T00:00:00Z
//!
//! # Daily buckets for a month, 30 minute buffer, Stockholm calendar
//! unavail -i bookings.json --buffer-minutes 30 --tz Europe/Stockholm daily --at 2020-01-15T12:00:00Z
//!
//! # Availability window after a start instant (prints `null` when unbounded)
//! unavail -i bookings.json --config calculator.json window --start 2020-01-01T00:00:00Z
//! ```
//!
//! Configuration comes from `--config` when given, otherwise from the
//! `UNAVAIL_BUFFER_MINUTES` / `UNAVAIL_TIME_ZONE` environment variables.
//! `--buffer-minutes` and `--tz` override either. Logs go to stderr and are
//! controlled by `RUST_LOG`.

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use tracing_subscriber::EnvFilter;
use unavailability_engine::{CalculatorConfig, UnavailabilityCalculator, UnavailabilityDataset};

#[derive(Parser)]
#[command(
    name = "unavail",
    version,
    about = "Unavailability statistics and availability windows for booked resources"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Dataset JSON file (reads from stdin if omitted)
    #[arg(short, long, global = true)]
    input: Option<String>,

    /// Output file (writes to stdout if omitted)
    #[arg(short, long, global = true)]
    output: Option<String>,

    /// Calculator configuration JSON file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Mandatory buffer between bookings, in minutes
    #[arg(long, global = true, allow_negative_numbers = true)]
    buffer_minutes: Option<i64>,

    /// IANA time zone calendar boundaries are chosen in
    #[arg(long, global = true)]
    tz: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Hourly unavailability for the day containing an instant
    Hourly {
        /// RFC 3339 instant inside the day
        #[arg(long)]
        at: String,
    },
    /// Daily unavailability for the month containing an instant
    Daily {
        /// RFC 3339 instant inside the month
        #[arg(long)]
        at: String,
    },
    /// Availability window starting at an instant
    Window {
        /// RFC 3339 start instant
        #[arg(long)]
        start: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let calc = build_calculator(&cli)?;
    let raw = read_input(cli.input.as_deref())?;
    let dataset = UnavailabilityDataset::from_json(&raw).context("Failed to parse dataset JSON")?;
    tracing::info!(
        records = dataset.records.len(),
        tracked = dataset.total_unique_identifiers,
        "loaded dataset"
    );

    let json = match &cli.command {
        Commands::Hourly { at } => {
            let instant = parse_instant(at)?;
            serde_json::to_string_pretty(&calc.hourly_unavailability_for_day(&instant, &dataset))?
        }
        Commands::Daily { at } => {
            let instant = parse_instant(at)?;
            serde_json::to_string_pretty(&calc.daily_unavailability_for_month(&instant, &dataset))?
        }
        Commands::Window { start } => {
            let instant = parse_instant(start)?;
            let window = calc
                .availability_interval_for_start_date_time(&instant, &dataset)
                .context("Failed to compute availability window")?;
            serde_json::to_string_pretty(&window)?
        }
    };

    write_output(cli.output.as_deref(), &json)
}

/// Layer `--buffer-minutes` and `--tz` over the file or environment config.
fn build_calculator(cli: &Cli) -> Result<UnavailabilityCalculator> {
    let mut cfg = match cli.config.as_deref() {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path))?;
            CalculatorConfig::from_json(&raw)
                .with_context(|| format!("Failed to parse config file: {}", path))?
        }
        None => CalculatorConfig::from_env().context("Failed to load configuration from environment")?,
    };

    if let Some(minutes) = cli.buffer_minutes {
        cfg.buffer_minutes = minutes;
    }
    if let Some(tz) = &cli.tz {
        cfg.time_zone = tz.clone();
    }

    tracing::debug!(?cfg, "resolved calculator configuration");
    cfg.build().context("Invalid calculator configuration")
}

fn parse_instant(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).with_context(|| format!("Invalid RFC 3339 instant: {}", raw))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
