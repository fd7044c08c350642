//! `emissions-atlas` library crate.
//!
//! The data layer of a CO₂ emissions dashboard: fetch the country-level
//! emissions CSV, normalize and validate it into typed records, fall back to a
//! synthetic dataset when the source is unreachable, and memoize the result.
//!
//! The binary (`atlas`) is a thin wrapper around this library so chart views,
//! exporters, and tests can share the same pipeline.

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
