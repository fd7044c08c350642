//! Command-line parsing for the emissions dataset tool.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! pipeline; resolution into a `LoadConfig` happens in `app`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::ExportFormat;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "atlas", version, about = "CO2 emissions, population and GDP dataset loader")]
pub struct Cli {
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the dataset and print provenance, row accounting and top emitters.
    Summary(SummaryArgs),
    /// Load the dataset and write a year/country selection as CSV or JSON.
    Export(ExportArgs),
}

/// Options shared by every command that loads the dataset.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Dataset CSV URL (overrides `EMISSIONS_CSV_URL`).
    #[arg(long)]
    pub url: Option<String>,

    /// Do not touch the network; serve the synthetic dataset.
    #[arg(long)]
    pub offline: bool,

    /// Seed for the synthetic fallback (random when omitted).
    #[arg(long)]
    pub seed: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Number of top emitters to list for the latest year.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Print the summary as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ExportArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Only export this year.
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Only export these countries (repeatable).
    #[arg(short, long = "country", value_name = "NAME")]
    pub countries: Vec<String>,

    /// Output format.
    #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
    pub format: ExportFormat,

    /// Output file; `-` writes to stdout. Defaults to a timestamped file name.
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}
