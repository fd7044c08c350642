//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initializes logging
//! - resolves the load configuration (flags, `.env`, defaults)
//! - loads the dataset and prints or exports it

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use tracing::{debug, info};

use crate::cli::{Cli, Command, ExportArgs, SourceArgs, SummaryArgs};
use crate::domain::{DEFAULT_DATASET_URL, ExportFormat, LoadConfig, SampleConfig, Selection};
use crate::error::AppError;

pub mod pipeline;

use pipeline::EmissionsStore;

/// Environment variable that overrides the default dataset URL.
pub const URL_ENV: &str = "EMISSIONS_CSV_URL";

/// Entry point for the `atlas` binary.
pub async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Summary(args) => handle_summary(args).await,
        Command::Export(args) => handle_export(args).await,
    }
}

/// Structured logging to stderr; `RUST_LOG` wins over the CLI flags.
fn init_logging(verbose: u8, quiet: bool) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("emissions_atlas={level}")));

    // `try_init` so repeated calls (tests, embedding) don't panic.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("logging initialized at level: {level}");
}

/// Resolve flags + environment into a `LoadConfig`.
///
/// URL precedence: `--url`, then `EMISSIONS_CSV_URL` (including `.env`), then
/// the built-in default.
pub fn load_config_from_args(args: &SourceArgs) -> LoadConfig {
    dotenvy::dotenv().ok();
    let env_url = std::env::var(URL_ENV).ok().filter(|s| !s.trim().is_empty());
    resolve_load_config(args, env_url)
}

fn resolve_load_config(args: &SourceArgs, env_url: Option<String>) -> LoadConfig {
    let url = args
        .url
        .clone()
        .or(env_url)
        .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());

    LoadConfig {
        url,
        offline: args.offline,
        sample: SampleConfig { seed: args.seed },
    }
}

async fn handle_summary(args: SummaryArgs) -> Result<(), AppError> {
    let config = load_config_from_args(&args.source);
    let store = EmissionsStore::from_config(&config);
    let dataset = store.dataset().await;

    if args.json {
        let summary = crate::report::summarize(&dataset, args.top);
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| AppError::new(4, format!("Failed to serialize summary: {e}")))?;
        println!("{json}");
    } else {
        print!("{}", crate::report::format_load_summary(&dataset, args.top));
    }

    Ok(())
}

async fn handle_export(args: ExportArgs) -> Result<(), AppError> {
    let config = load_config_from_args(&args.source);
    let store = EmissionsStore::from_config(&config);
    let dataset = store.dataset().await;

    let selection = Selection {
        year: args.year,
        countries: args.countries.clone(),
    };
    let records = dataset.select(&selection);

    match args.out.as_deref() {
        Some(path) if path == Path::new("-") => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            crate::io::export::write_records(&mut lock, &records, args.format)?;
            lock.flush()
                .map_err(|e| AppError::new(2, format!("Failed to flush stdout: {e}")))?;
        }
        out => {
            let path = out
                .map(Path::to_path_buf)
                .unwrap_or_else(|| default_export_path(&selection, args.format));
            crate::io::export::export_to_path(&path, &records, args.format)?;
            info!(
                path = %path.display(),
                records = records.len(),
                provenance = dataset.provenance.display_name(),
                "export written"
            );
        }
    }

    Ok(())
}

/// `co2_data[_<year>]_<timestamp>.<ext>` in the working directory.
fn default_export_path(selection: &Selection, format: ExportFormat) -> PathBuf {
    let ts = Local::now().format("%Y%m%d_%H%M%S");
    let year = selection.year.map(|y| format!("_{y}")).unwrap_or_default();
    PathBuf::from(format!("co2_data{year}_{ts}.{}", format.extension()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_args(url: Option<&str>) -> SourceArgs {
        SourceArgs {
            url: url.map(str::to_string),
            offline: false,
            seed: Some(9),
        }
    }

    #[test]
    fn cli_url_beats_env_url() {
        let config = resolve_load_config(&source_args(Some("http://cli")), Some("http://env".to_string()));
        assert_eq!(config.url, "http://cli");
        assert_eq!(config.sample.seed, Some(9));
    }

    #[test]
    fn env_url_beats_default() {
        let config = resolve_load_config(&source_args(None), Some("http://env".to_string()));
        assert_eq!(config.url, "http://env");
    }

    #[test]
    fn default_url_when_unset() {
        let config = resolve_load_config(&source_args(None), None);
        assert_eq!(config.url, DEFAULT_DATASET_URL);
        assert!(!config.offline);
    }

    #[test]
    fn default_export_path_names_year_and_format() {
        let selection = Selection {
            year: Some(2020),
            countries: vec![],
        };
        let path = default_export_path(&selection, ExportFormat::Json);
        let name = path.to_string_lossy();
        assert!(name.starts_with("co2_data_2020_"));
        assert!(name.ends_with(".json"));
    }
}
