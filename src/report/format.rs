//! Formatted terminal output for a dataset load.
//!
//! We keep formatting code in one place so the pipeline stays free of
//! presentation and output changes are localized.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::app::pipeline::LoadedDataset;
use crate::domain::{EmissionRecord, Provenance};

/// Machine-readable summary of a load (the `--json` form of the report).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadSummary {
    pub provenance: Provenance,
    pub source: String,
    pub fallback_reason: Option<String>,
    pub records: usize,
    pub countries: usize,
    pub year_min: Option<i32>,
    pub year_max: Option<i32>,
    pub rows_read: Option<usize>,
    pub rows_rejected: Option<usize>,
    pub rejections: BTreeMap<&'static str, usize>,
    pub missing_columns: Vec<String>,
    pub top_emitters: Vec<EmissionRecord>,
}

/// Collect the summary numbers for `dataset`.
pub fn summarize(dataset: &LoadedDataset, top_n: usize) -> LoadSummary {
    let years = dataset.years();
    let year_max = years.last().copied();
    let top_emitters: Vec<EmissionRecord> = year_max
        .map(|y| dataset.top_emitters(y, top_n).into_iter().cloned().collect())
        .unwrap_or_default();

    let report = dataset.report.as_ref();
    LoadSummary {
        provenance: dataset.provenance,
        source: dataset.source.clone(),
        fallback_reason: dataset.fallback_reason.clone(),
        records: dataset.records.len(),
        countries: dataset.countries().len(),
        year_min: years.first().copied(),
        year_max,
        rows_read: report.map(|r| r.rows_read),
        rows_rejected: report.map(|r| r.rows_rejected()),
        rejections: report.map(|r| r.rejection_counts()).unwrap_or_default(),
        missing_columns: report.map(|r| r.missing_columns.clone()).unwrap_or_default(),
        top_emitters,
    }
}

/// Format the load summary for the terminal.
pub fn format_load_summary(dataset: &LoadedDataset, top_n: usize) -> String {
    let s = summarize(dataset, top_n);
    let mut out = String::new();

    out.push_str("=== atlas - CO2 emissions dataset ===\n");
    out.push_str(&format!("Provenance: {}\n", s.provenance.display_name()));
    out.push_str(&format!("Source: {}\n", s.source));
    if let Some(reason) = &s.fallback_reason {
        out.push_str(&format!("Fallback reason: {reason}\n"));
    }

    if let (Some(read), Some(rejected)) = (s.rows_read, s.rows_rejected) {
        out.push_str(&format!(
            "Rows: read={read} | used={} | rejected={rejected}\n",
            s.records
        ));
        for (kind, count) in &s.rejections {
            out.push_str(&format!("  {kind:<18} {count:>8}\n"));
        }
    }
    if !s.missing_columns.is_empty() {
        out.push_str(&format!("Missing columns: {}\n", s.missing_columns.join(", ")));
    }

    match (s.year_min, s.year_max) {
        (Some(lo), Some(hi)) => out.push_str(&format!(
            "Records: n={} | countries={} | years=[{lo}, {hi}]\n",
            s.records, s.countries
        )),
        _ => out.push_str("Records: none\n"),
    }

    if let Some(year) = s.year_max {
        if !s.top_emitters.is_empty() {
            out.push_str(&format!("\nTop emitters ({year}):\n"));
            out.push_str(&format!(
                "{:<4} {:<28} {:>12} {:>12} {:>12} {:>10}\n",
                "#", "country", "co2_mt", "pop_m", "gdp_pc_usd", "t_per_cap"
            ));
            for (i, r) in s.top_emitters.iter().enumerate() {
                out.push_str(&format!(
                    "{:<4} {:<28} {:>12.1} {:>12.2} {:>12.0} {:>10.2}\n",
                    i + 1,
                    truncate(&r.country, 28),
                    r.co2_emissions,
                    r.population,
                    r.gdp_per_capita,
                    r.co2_per_capita,
                ));
            }
        }
    }

    out
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
    t.push('…');
    t
}
