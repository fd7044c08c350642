//! CSV ingest and normalization.
//!
//! This module is responsible for turning the raw emissions CSV into clean
//! `EmissionRecord`s that chart views can consume directly.
//!
//! Design goals:
//! - **Lenient rows**: a bad row is skipped and reported, never fatal
//! - **Unit normalization**: population in millions, GDP per person in USD
//! - **Separation of concerns**: domain rules live in `validate`

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::domain::EmissionRecord;
use crate::error::IngestError;
use crate::io::row::parse_row;
use crate::io::validate::{RejectReason, validate};

/// Columns the normalizer reads; `co2_per_capita` is optional per row.
pub const REQUIRED_COLUMNS: [&str; 6] = ["country", "year", "co2", "population", "gdp", "co2_per_capita"];

/// Raw population is a head count; records store millions.
const PEOPLE_PER_MILLION: f64 = 1_000_000.0;

/// A parsed row before domain validation.
///
/// `None` marks a value that was absent or not numeric.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    pub country: String,
    pub year: Option<i32>,
    pub co2: Option<f64>,
    /// Head count as supplied (not yet converted to millions).
    pub population_raw: Option<f64>,
    /// Total GDP in USD.
    pub gdp: Option<f64>,
    pub co2_per_capita: Option<f64>,
}

impl CandidateRecord {
    /// Apply unit conversions and derived fields.
    ///
    /// Missing numeric values become NaN here; call `validate` instead of this
    /// directly unless the candidate is already known to be valid.
    pub fn to_record(&self) -> EmissionRecord {
        let population_raw = self.population_raw.unwrap_or(f64::NAN);
        let gdp = self.gdp.unwrap_or(f64::NAN);
        EmissionRecord {
            country: self.country.clone(),
            year: self.year.unwrap_or_default(),
            co2_emissions: self.co2.unwrap_or(f64::NAN),
            population: population_raw / PEOPLE_PER_MILLION,
            // Uses the raw head count, not the converted millions.
            gdp_per_capita: gdp / population_raw,
            co2_per_capita: self.co2_per_capita.unwrap_or(0.0),
        }
    }
}

/// Header column positions, keyed by normalized column name.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
    len: usize,
}

impl HeaderMap {
    pub fn from_line(line: &str) -> Self {
        let names = parse_row(line);
        let len = names.len();
        let columns = names
            .iter()
            .enumerate()
            .map(|(idx, name)| (normalize_header_name(name), idx))
            .collect();
        Self { columns, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Required columns the header does not provide.
    pub fn missing_columns(&self) -> Vec<String> {
        REQUIRED_COLUMNS
            .iter()
            .filter(|name| !self.contains(name))
            .map(|name| name.to_string())
            .collect()
    }

    fn get<'a>(&self, values: &'a [String], name: &str) -> Option<&'a str> {
        let idx = self.columns.get(name)?;
        values.get(*idx).map(String::as_str)
    }
}

/// A row-level rejection encountered during ingest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowRejection {
    /// 1-based line number in the source document.
    pub line: usize,
    pub reason: RejectReason,
}

/// What happened to the rows of one document.
#[derive(Debug, Clone, Default, Serialize)]
pub struct IngestReport {
    pub rows_read: usize,
    pub rows_used: usize,
    pub rejections: Vec<RowRejection>,
    /// Required columns absent from the header line.
    pub missing_columns: Vec<String>,
}

impl IngestReport {
    pub fn rows_rejected(&self) -> usize {
        self.rejections.len()
    }

    /// Rejection totals grouped by `RejectReason::kind`.
    pub fn rejection_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.rejections {
            *counts.entry(r.reason.kind()).or_insert(0) += 1;
        }
        counts
    }
}

/// Normalized records plus the report describing skipped rows.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub records: Vec<EmissionRecord>,
    pub report: IngestReport,
}

/// Parse one data line into a candidate record.
pub fn normalize_row(header: &HeaderMap, line: &str) -> Result<CandidateRecord, RejectReason> {
    let values = parse_row(line);
    if values.len() < header.len() {
        return Err(RejectReason::MalformedRow {
            expected: header.len(),
            found: values.len(),
        });
    }

    Ok(CandidateRecord {
        country: header.get(&values, "country").unwrap_or_default().to_string(),
        year: parse_year(header.get(&values, "year")),
        co2: parse_opt_f64(header.get(&values, "co2")),
        population_raw: parse_opt_f64(header.get(&values, "population")),
        gdp: parse_opt_f64(header.get(&values, "gdp")),
        co2_per_capita: parse_opt_f64(header.get(&values, "co2_per_capita")),
    })
}

/// Ingest a whole CSV document: header detection, normalization, validation.
///
/// Rows that fail are recorded in the report and skipped. Only a document
/// without any header line is an error.
pub fn ingest_csv(text: &str) -> Result<IngestedData, IngestError> {
    let mut lines = text
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty());

    let (_, header_line) = lines.next().ok_or(IngestError::EmptyDocument)?;
    let header = HeaderMap::from_line(header_line);

    let mut report = IngestReport {
        missing_columns: header.missing_columns(),
        ..IngestReport::default()
    };
    let mut records = Vec::new();

    for (idx, line) in lines {
        report.rows_read += 1;
        let outcome = normalize_row(&header, line).and_then(|candidate| validate(&candidate));
        match outcome {
            Ok(record) => records.push(record),
            Err(reason) => report.rejections.push(RowRejection {
                line: idx + 1,
                reason,
            }),
        }
    }

    report.rows_used = records.len();
    Ok(IngestedData { records, report })
}

fn normalize_header_name(name: &str) -> String {
    // Strip a UTF-8 BOM on the first header so `country` still matches.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn parse_opt_f64(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

fn parse_year(s: Option<&str>) -> Option<i32> {
    let s = s?.trim();
    if let Ok(year) = s.parse::<i32>() {
        return Some(year);
    }
    // Some exports write years as `2005.0`.
    let v = parse_opt_f64(Some(s))?;
    if v.abs() < i32::MAX as f64 { Some(v.trunc() as i32) } else { None }
}
