//! Export a record selection to CSV or JSON.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.
//! Column order follows `EmissionRecord`'s field order.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::{EmissionRecord, ExportFormat};
use crate::error::AppError;

/// Write records as CSV with a header row.
pub fn write_records_csv<W: Write>(writer: W, records: &[&EmissionRecord]) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    if records.is_empty() {
        // `serialize` only emits the header alongside the first row.
        out.write_record(["country", "year", "co2Emissions", "population", "gdpPerCapita", "co2PerCapita"])
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV header: {e}")))?;
    }
    for r in records {
        out.serialize(r)
            .map_err(|e| AppError::new(4, format!("Failed to write export CSV row: {e}")))?;
    }
    out.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_records_json<W: Write>(mut writer: W, records: &[&EmissionRecord]) -> Result<(), AppError> {
    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| AppError::new(4, format!("Failed to write export JSON: {e}")))?;
    writeln!(writer).map_err(|e| AppError::new(2, format!("Failed to write export JSON: {e}")))?;
    Ok(())
}

/// Write records in `format` to any writer.
pub fn write_records<W: Write>(writer: W, records: &[&EmissionRecord], format: ExportFormat) -> Result<(), AppError> {
    match format {
        ExportFormat::Csv => write_records_csv(writer, records),
        ExportFormat::Json => write_records_json(writer, records),
    }
}

/// Write records in `format` to a file, creating or truncating it.
pub fn export_to_path(path: &Path, records: &[&EmissionRecord], format: ExportFormat) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export file '{}': {e}", path.display())))?;
    write_records(file, records, format)
}
