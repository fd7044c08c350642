//! Input/output helpers.
//!
//! - single-line CSV splitting (`row`)
//! - CSV ingest + normalization (`ingest`)
//! - domain validation (`validate`)
//! - record exports (CSV/JSON) (`export`)

pub mod export;
pub mod ingest;
pub mod row;
pub mod validate;

pub use export::*;
pub use ingest::*;
pub use row::*;
pub use validate::*;
