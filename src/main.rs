// src/main.rs
//! CLI collaborator around the Berichtsheft coverage engine.
//!
//! Sources the profile from flags or environment, the existing Nachweise
//! from a CSV file, and `today` from a flag or the system clock, then hands
//! everything to the engine and prints its answer. The binary does what the
//! surrounding web application would do; the engine itself never touches
//! clock, files or environment.

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use berichtsheft_core::{
    covered_periods, current_period, current_period_bounds, missing_periods, Nachweis,
    NachweisSeed, ParseIntervalError, ReportingInterval, ReportingPeriod, TrainingProfile,
};

// --- Error Handling ---

#[derive(Error, Debug)]
enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] envy::Error),
    #[error("Invalid BERICHTSHEFT_INTERVAL: {0}")]
    ConfigInterval(#[from] ParseIntervalError),
    #[error("Failed to load Nachweis reports: {0:#}")]
    Reports(#[from] anyhow::Error),
    #[error("JSON serialization failed: {0}")]
    SerdeJson(#[from] serde_json::Error),
}

// --- Configuration ---

/// Environment-side defaults for the profile, overridden by CLI flags.
/// Read as `BERICHTSHEFT_START_DATE`, `BERICHTSHEFT_INTERVAL`,
/// `BERICHTSHEFT_REPORTS`.
#[derive(Debug, Deserialize, Clone)]
struct Config {
    start_date: Option<NaiveDate>,
    interval: Option<String>,
    reports: Option<PathBuf>,
}

impl Config {
    fn from_env() -> Result<Self, envy::Error> {
        // Load .env file if it exists
        dotenv::dotenv().ok();

        envy::prefixed("BERICHTSHEFT_").from_env::<Config>()
    }

    fn interval(&self) -> Result<Option<ReportingInterval>, ParseIntervalError> {
        self.interval.as_deref().map(str::parse).transpose()
    }
}

// --- CLI ---

#[derive(Parser, Debug)]
#[command(name = "berichtsheft", version, about = "Reporting period bookkeeping for Azubis")]
struct Cli {
    /// First day of the Ausbildung (YYYY-MM-DD).
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Reporting interval: daily, weekly, monthly or other.
    #[arg(long)]
    interval: Option<ReportingInterval>,

    /// CSV file with the existing Nachweis rows.
    #[arg(long)]
    reports: Option<PathBuf>,

    /// Override the system date (YYYY-MM-DD) for reproducible output.
    #[arg(long)]
    today: Option<NaiveDate>,

    /// Emit JSON instead of human-readable text.
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the period containing today and whether it is already covered.
    Current,
    /// List every past period without a Nachweis, newest first.
    Missing,
    /// Print the pre-fill values for the next Nachweis.
    Seed {
        /// Target the period containing this date instead of today, e.g. to
        /// fill a reported gap.
        #[arg(long)]
        for_date: Option<NaiveDate>,
    },
}

#[derive(Debug, Serialize)]
struct CurrentOutput {
    period: ReportingPeriod,
    reported: bool,
}

// --- Main Application Logic ---

fn main() -> Result<(), AppError> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::from_env()?;

    let profile = TrainingProfile::new(
        cli.start_date.or(config.start_date),
        cli.interval
            .or(config.interval()?)
            .unwrap_or(ReportingInterval::Other),
    );
    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    let reports = load_reports(cli.reports.or(config.reports).as_deref())?;
    let periods = covered_periods(&reports);

    match cli.command {
        Command::Current => run_current(&profile, today, &periods, cli.json),
        Command::Missing => run_missing(&profile, today, &periods, cli.json),
        Command::Seed { for_date } => {
            run_seed(&profile, for_date.unwrap_or(today), &reports, cli.json)
        }
    }
}

fn load_reports(path: Option<&Path>) -> anyhow::Result<Vec<Nachweis>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let file =
        File::open(path).with_context(|| format!("opening report file {}", path.display()))?;
    let mut reader = csv::Reader::from_reader(file);
    let mut reports = Vec::new();
    for row in reader.deserialize() {
        let row: Nachweis =
            row.with_context(|| format!("parsing Nachweis row in {}", path.display()))?;
        reports.push(row);
    }
    info!(
        "Loaded {} Nachweis row(s) from {}",
        reports.len(),
        path.display()
    );
    Ok(reports)
}

fn run_current(
    profile: &TrainingProfile,
    today: NaiveDate,
    periods: &[ReportingPeriod],
    json: bool,
) -> Result<(), AppError> {
    let Some(bounds) = current_period_bounds(profile.interval, today) else {
        println!("No usable reporting interval configured.");
        return Ok(());
    };
    let reported = current_period(profile, today, periods).is_some();

    if json {
        let output = CurrentOutput { period: bounds, reported };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if reported {
        println!("Current period {bounds}: Nachweis already recorded.");
    } else {
        println!("Current period {bounds}: no Nachweis yet.");
    }
    Ok(())
}

fn run_missing(
    profile: &TrainingProfile,
    today: NaiveDate,
    periods: &[ReportingPeriod],
    json: bool,
) -> Result<(), AppError> {
    let Some(missing) = missing_periods(profile, today, periods) else {
        println!(
            "Missing periods cannot be computed: the profile needs a start date \
             and a daily, weekly or monthly interval."
        );
        return Ok(());
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&missing)?);
    } else if missing.is_empty() {
        println!("No missing Nachweise.");
    } else {
        println!("{} missing Nachweis(e):", missing.len());
        for period in &missing {
            println!("  {period}");
        }
    }
    Ok(())
}

fn run_seed(
    profile: &TrainingProfile,
    target_date: NaiveDate,
    reports: &[Nachweis],
    json: bool,
) -> Result<(), AppError> {
    let Some(bounds) = current_period_bounds(profile.interval, target_date) else {
        println!("No usable reporting interval configured.");
        return Ok(());
    };
    let seed = NachweisSeed::for_period(profile, bounds, reports);

    if json {
        println!("{}", serde_json::to_string_pretty(&seed)?);
    } else {
        println!("Nummer:           {}", seed.nummer);
        println!("Ausbildungswoche: {}", seed.ausbildungswoche);
        println!("Jahr:             {}", seed.jahr);
        println!("Kalenderwoche:    {}", seed.kalenderwoche);
        println!("Vom:              {}", seed.datum_start);
        println!("Bis:              {}", seed.datum_ende);
    }
    Ok(())
}
