//! Command-line access to the report core.
//!
//! Report files are JSON arrays of stored reports (camelCase fields).

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use bache_core::config::CoreConfig;
use bache_core::export::csv::{reports_to_csv, EXPORT_FILE_NAME};
use bache_core::export::map::{heat_points, map_points, HeatLayerOptions};
use bache_core::identity::alias::generate_alias;
use bache_core::init_logger;
use bache_core::leaderboard::aggregate::{aggregate_with, RankPolicy};
use bache_core::storage::models::Report;
use bache_core::validation::issue::validate_issue_value;
use bache_core::validation::photo::compute_photo_hash;
use bache_core::validation::report::validate_value;
use bache_core::ValidationErrors;
use clap::{Parser, Subcommand};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "bache", about = "Pothole report tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the display alias for a user id
    Alias {
        /// Opaque user id
        user_id: String,
    },
    /// Print the SHA-256 content hash of a photo file
    Hash {
        /// Path to the photo
        photo: PathBuf,
    },
    /// Validate a candidate report (JSON object)
    Validate {
        /// Path to the candidate report
        file: PathBuf,
    },
    /// Validate a user issue report (JSON object)
    ValidateIssue {
        /// Path to the issue
        file: PathBuf,
    },
    /// Rank reporters by total score
    Leaderboard {
        /// Path to the reports file
        file: PathBuf,
        /// Let tied users share a rank
        #[arg(long)]
        competition: bool,
    },
    /// Export reports as CSV
    ExportCsv {
        /// Path to the reports file
        file: PathBuf,
        /// Output path (defaults to stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print map markers and heat-layer points
    Map {
        /// Path to the reports file
        file: PathBuf,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn read_json(path: &Path) -> anyhow::Result<serde_json::Value> {
    let text = fs::read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Parse JSON from {}", path.display()))
}

/// Print the accepted record, or every error on stderr with a failing exit code.
fn report_outcome<T: Serialize>(result: Result<T, ValidationErrors>) -> anyhow::Result<ExitCode> {
    match result {
        Ok(record) => {
            print_json(&record)?;
            Ok(ExitCode::SUCCESS)
        }
        Err(errors) => {
            for error in errors.errors() {
                eprintln!("{}", error);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_reports(path: &Path) -> anyhow::Result<Vec<Report>> {
    let text = fs::read_to_string(path).with_context(|| format!("Read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Parse reports from {}", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    match cli.command {
        Commands::Alias { user_id } => {
            println!("{}", generate_alias(&user_id)?);
        }
        Commands::Hash { photo } => {
            let bytes = fs::read(&photo).with_context(|| format!("Read {}", photo.display()))?;
            println!("{}", compute_photo_hash(&bytes));
        }
        Commands::Validate { file } => {
            let value = read_json(&file)?;
            return report_outcome(validate_value(&value));
        }
        Commands::ValidateIssue { file } => {
            let value = read_json(&file)?;
            return report_outcome(validate_issue_value(&value));
        }
        Commands::Leaderboard { file, competition } => {
            let policy = if competition {
                RankPolicy::Competition
            } else {
                RankPolicy::Sequential
            };
            print_json(&aggregate_with(&read_reports(&file)?, policy))?;
        }
        Commands::ExportCsv { file, output } => {
            let csv = reports_to_csv(&read_reports(&file)?);
            match output {
                Some(path) => {
                    fs::write(&path, csv).with_context(|| format!("Write {}", path.display()))?;
                    log::info!("CSV_WRITTEN path={}", path.display());
                }
                None => println!("{}", csv),
            }
        }
        Commands::Map { file } => {
            let config = CoreConfig::from_env().context("Load configuration")?;
            let points = map_points(&read_reports(&file)?);
            let view = config.map_view;
            print_json(&serde_json::json!({
                "center": [view.center.lat, view.center.lng],
                "zoom": view.zoom,
                "markers": points,
                "heat": heat_points(&points),
                "heatOptions": HeatLayerOptions::default(),
            }))?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> anyhow::Result<ExitCode> {
    init_logger();
    log::debug!("CLI_START export_file={}", EXPORT_FILE_NAME);
    run(Cli::parse())
}
