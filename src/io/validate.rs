//! Domain validation for normalized candidates.
//!
//! A candidate becomes an `EmissionRecord` only if it names a real country
//! (not an aggregate), falls inside the supported year window, and carries
//! strictly positive emissions, population and GDP. Everything else is turned
//! into a `RejectReason` that the ingest report collects.

use std::fmt;

use serde::Serialize;

use crate::domain::{EmissionRecord, YEAR_MAX, YEAR_MIN};
use crate::io::ingest::CandidateRecord;

/// Aggregate row covering the whole planet.
const WORLD: &str = "World";
/// Marker shared by income-group aggregates ("High-income countries", ...).
const INCOME_MARKER: &str = "income";

/// Numeric source column that must be present and positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Co2,
    Population,
    Gdp,
}

impl Field {
    pub fn column(self) -> &'static str {
        match self {
            Field::Co2 => "co2",
            Field::Population => "population",
            Field::Gdp => "gdp",
        }
    }
}

/// Why a source row did not make it into the dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RejectReason {
    /// The row has fewer values than the header has columns.
    MalformedRow { expected: usize, found: usize },
    MissingCountry,
    /// "World" or an income-group aggregate.
    AggregateRegion,
    InvalidYear,
    YearOutOfRange { year: i32 },
    NonNumeric { field: Field },
    NonPositive { field: Field },
}

impl RejectReason {
    /// Stable label used to group rejections in reports.
    pub fn kind(&self) -> &'static str {
        match self {
            RejectReason::MalformedRow { .. } => "malformed_row",
            RejectReason::MissingCountry => "missing_country",
            RejectReason::AggregateRegion => "aggregate_region",
            RejectReason::InvalidYear => "invalid_year",
            RejectReason::YearOutOfRange { .. } => "year_out_of_range",
            RejectReason::NonNumeric { .. } => "non_numeric",
            RejectReason::NonPositive { .. } => "non_positive",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::MalformedRow { expected, found } => {
                write!(f, "row has {found} values, header has {expected}")
            }
            RejectReason::MissingCountry => write!(f, "missing country"),
            RejectReason::AggregateRegion => write!(f, "aggregate region"),
            RejectReason::InvalidYear => write!(f, "missing/invalid `year`"),
            RejectReason::YearOutOfRange { year } => {
                write!(f, "year {year} outside {YEAR_MIN}..={YEAR_MAX}")
            }
            RejectReason::NonNumeric { field } => write!(f, "missing/invalid `{}`", field.column()),
            RejectReason::NonPositive { field } => write!(f, "`{}` must be > 0", field.column()),
        }
    }
}

/// True for rows that describe a grouping of countries rather than a country.
pub fn is_aggregate(country: &str) -> bool {
    country == WORLD || country.contains(INCOME_MARKER)
}

/// Accept a candidate into the dataset or explain why not.
pub fn validate(candidate: &CandidateRecord) -> Result<EmissionRecord, RejectReason> {
    let country = candidate.country.trim();
    if country.is_empty() {
        return Err(RejectReason::MissingCountry);
    }
    if is_aggregate(country) {
        return Err(RejectReason::AggregateRegion);
    }

    let year = candidate.year.ok_or(RejectReason::InvalidYear)?;
    if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
        return Err(RejectReason::YearOutOfRange { year });
    }

    let co2 = required(candidate.co2, Field::Co2)?;
    let population = required(candidate.population_raw, Field::Population)?;
    let gdp = required(candidate.gdp, Field::Gdp)?;

    positive(co2, Field::Co2)?;
    positive(population, Field::Population)?;
    positive(gdp, Field::Gdp)?;

    Ok(candidate.to_record())
}

fn required(value: Option<f64>, field: Field) -> Result<f64, RejectReason> {
    value.ok_or(RejectReason::NonNumeric { field })
}

fn positive(value: f64, field: Field) -> Result<(), RejectReason> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(RejectReason::NonPositive { field })
    }
}
