//! Reporting utilities: load summaries for the terminal and for JSON output.

pub mod format;

pub use format::{LoadSummary, format_load_summary, summarize};
