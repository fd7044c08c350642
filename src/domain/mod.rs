//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the normalized observation (`EmissionRecord`) and its provenance
//! - load/sample configuration (`LoadConfig`, `SampleConfig`)
//! - view selections and simple dataset queries

pub mod types;

pub use types::*;
