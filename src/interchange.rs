//! CSV and JSON interchange of comparison records
//!
//! - CSV: one flat row per record, for spreadsheets
//! - JSON: array of full records, the only format accepted on import

use std::io::{Read, Write};

use chrono::SecondsFormat;
use serde::Serialize;
use tracing::{debug, info};

use crate::record::ComparisonRecord;
use crate::repository::ComparisonRepository;
use crate::Result;

/// Flat CSV row; field order is the column order
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    id: String,
    timestamp: String,
    title: &'a str,
    reference_a_name: &'a str,
    reference_a_hex: &'a str,
    reference_b_name: &'a str,
    reference_b_hex: &'a str,
    sample_hex: &'a str,
    d_a: String,
    d_b: String,
    toward_a_percent: String,
    toward_b_percent: String,
    separation: String,
    separation_label: &'static str,
    feedback: &'static str,
    notes: &'a str,
}

impl<'a> From<&'a ComparisonRecord> for CsvRow<'a> {
    fn from(record: &'a ComparisonRecord) -> Self {
        let metrics = &record.metrics;
        Self {
            id: record.id.to_string(),
            timestamp: record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            title: &record.title,
            reference_a_name: &record.reference_a.name,
            reference_a_hex: &record.reference_a.color.hex,
            reference_b_name: &record.reference_b.name,
            reference_b_hex: &record.reference_b.color.hex,
            sample_hex: &record.sample.hex,
            d_a: format!("{:.2}", metrics.d_a),
            d_b: format!("{:.2}", metrics.d_b),
            toward_a_percent: format!("{:.2}", metrics.toward_a),
            toward_b_percent: format!("{:.2}", metrics.toward_b),
            separation: format!("{:.2}", metrics.separation),
            separation_label: metrics.separation_label.as_str(),
            feedback: record.feedback.map(|f| f.as_str()).unwrap_or(""),
            notes: &record.notes,
        }
    }
}

/// Write records as CSV with a header row
///
/// # Errors
///
/// Returns `MatchError::CsvError` if writing fails.
pub fn export_csv<W: Write>(records: &[ComparisonRecord], writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    if records.is_empty() {
        // serde only emits the header alongside the first row
        csv.write_record(CSV_HEADER)?;
    }
    for record in records {
        csv.serialize(CsvRow::from(record))?;
    }
    csv.flush().map_err(csv::Error::from)?;
    debug!(count = records.len(), "exported records as CSV");
    Ok(())
}

/// Column names of the CSV export
pub const CSV_HEADER: [&str; 16] = [
    "id",
    "timestamp",
    "title",
    "reference_a_name",
    "reference_a_hex",
    "reference_b_name",
    "reference_b_hex",
    "sample_hex",
    "d_a",
    "d_b",
    "toward_a_percent",
    "toward_b_percent",
    "separation",
    "separation_label",
    "feedback",
    "notes",
];

/// Write records as a pretty-printed JSON array
///
/// # Errors
///
/// Returns `MatchError::SerializationError` if writing fails.
pub fn export_json<W: Write>(records: &[ComparisonRecord], writer: W) -> Result<()> {
    serde_json::to_writer_pretty(writer, records)?;
    debug!(count = records.len(), "exported records as JSON");
    Ok(())
}

/// Parse a JSON array of records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<ComparisonRecord>> {
    Ok(serde_json::from_reader(reader)?)
}

/// Import a JSON array of records, saving each one unchanged
///
/// The whole document is parsed before anything is saved, so a malformed
/// file leaves the repository untouched. Returns the number of records saved.
pub fn import_json<R: Read>(repo: &mut dyn ComparisonRepository, reader: R) -> Result<usize> {
    let records = parse_json(reader)?;
    let count = records.len();
    for record in records {
        repo.save(record)?;
    }
    info!(count, "imported comparison records");
    Ok(count)
}
