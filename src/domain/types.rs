//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - held in the in-memory dataset cache
//! - handed to chart views as plain data
//! - exported to JSON/CSV

use std::collections::BTreeSet;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// First calendar year kept by the validation filter.
pub const YEAR_MIN: i32 = 1990;
/// Last calendar year kept by the validation filter.
pub const YEAR_MAX: i32 = 2022;

/// Default location of the country-level CO₂ dataset.
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/owid/co2-data/master/owid-co2-data.csv";

/// One normalized country-year observation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmissionRecord {
    /// Country/region name as supplied by the source.
    pub country: String,
    pub year: i32,
    /// Total CO₂ emissions in megatonnes.
    pub co2_emissions: f64,
    /// Population in millions.
    pub population: f64,
    /// GDP per person in USD.
    pub gdp_per_capita: f64,
    /// Tonnes per person as reported by the source (0 when missing).
    pub co2_per_capita: f64,
}

/// Where a loaded dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Parsed from the remote CSV source.
    Real,
    /// Produced locally by the synthetic generator.
    Synthetic,
}

impl Provenance {
    pub fn display_name(self) -> &'static str {
        match self {
            Provenance::Real => "real",
            Provenance::Synthetic => "synthetic",
        }
    }
}

/// Output format for exported records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

/// Settings for the synthetic fallback generator.
#[derive(Debug, Clone, Default)]
pub struct SampleConfig {
    /// Fixed seed for reproducible output; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// How a dataset load is resolved, derived from CLI flags and environment.
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub url: String,
    /// Skip the network entirely and serve synthetic data.
    pub offline: bool,
    pub sample: SampleConfig,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_DATASET_URL.to_string(),
            offline: false,
            sample: SampleConfig::default(),
        }
    }
}

/// A view selection: one year and/or a set of countries.
///
/// An empty country list selects every country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub year: Option<i32>,
    pub countries: Vec<String>,
}

impl Selection {
    /// Records matching the selection, in dataset order.
    pub fn apply<'a>(&self, records: &'a [EmissionRecord]) -> Vec<&'a EmissionRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    pub fn matches(&self, record: &EmissionRecord) -> bool {
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        self.countries.is_empty() || self.countries.iter().any(|c| c == &record.country)
    }
}

/// Distinct years present, ascending.
pub fn years(records: &[EmissionRecord]) -> Vec<i32> {
    let set: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
    set.into_iter().collect()
}

/// Distinct country names present, sorted.
pub fn countries(records: &[EmissionRecord]) -> Vec<String> {
    let set: BTreeSet<&str> = records.iter().map(|r| r.country.as_str()).collect();
    set.into_iter().map(str::to_string).collect()
}

/// The `n` largest emitters in `year`, highest first.
pub fn top_emitters(records: &[EmissionRecord], year: i32, n: usize) -> Vec<&EmissionRecord> {
    let mut in_year: Vec<&EmissionRecord> = records.iter().filter(|r| r.year == year).collect();
    in_year.sort_by(|a, b| {
        b.co2_emissions
            .partial_cmp(&a.co2_emissions)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    in_year.truncate(n);
    in_year
}
