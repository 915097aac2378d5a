//! Tally CLI
//!
//! Offline command-line interface for the aggregation pipeline:
//! - Aggregate an event-log CSV into bucket counts
//! - Write the detailed (enriched) export
//!
//! Runs the same pipeline as the API server, without starting it.

use anyhow::Context;
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use tally::export;
use tally::ingest::Dataset;
use tally::pipeline::{self, DateRange, Granularity, PipelineOutput, WeekStart};

#[derive(Parser)]
#[command(name = "tally-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Usage count analysis over event-log CSV files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// IANA timezone the timestamps are resolved in
    #[arg(long, default_value = "Asia/Singapore", global = true)]
    pub timezone: String,

    /// First day of the week for week bucketing
    #[arg(long, value_enum, default_value = "monday", global = true)]
    pub week_start: WeekStart,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Aggregate bucket counts for a date range
    Counts {
        /// Path to the event-log CSV
        path: PathBuf,
        /// Bucketing granularity
        #[arg(short, long, value_enum, default_value = "day")]
        granularity: Granularity,
        /// Inclusive range start (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Inclusive range end (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Write the aggregated CSV here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the detailed export (every record plus enrichment columns)
    Detailed {
        /// Path to the event-log CSV
        path: PathBuf,
        /// Output CSV path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tally=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let timezone: Tz = cli
        .timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("unknown timezone: {}", cli.timezone))?;

    match cli.command {
        Commands::Counts {
            path,
            granularity,
            start,
            end,
            output,
        } => {
            let dataset = Dataset::from_path(&path, timezone)
                .with_context(|| format!("failed to ingest {}", path.display()))?;

            let range = DateRange::new(start, end);
            let table = match pipeline::run(&dataset.records, &range, granularity, cli.week_start)
            {
                PipelineOutput::Empty => {
                    eprintln!("no events between {} and {}", start, end);
                    Vec::new()
                }
                PipelineOutput::Data { table, .. } => table,
            };

            let csv_out = export::aggregated_csv(&table, granularity)?;
            match output {
                Some(path) => std::fs::write(&path, csv_out)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{}", csv_out),
            }
        }

        Commands::Detailed { path, output } => {
            let dataset = Dataset::from_path(&path, timezone)
                .with_context(|| format!("failed to ingest {}", path.display()))?;

            let csv_out = export::detailed_csv(&dataset, cli.week_start)?;
            std::fs::write(&output, csv_out)
                .with_context(|| format!("failed to write {}", output.display()))?;

            eprintln!("wrote {} rows to {}", dataset.len(), output.display());
        }
    }

    Ok(())
}
