//! CSV export of kept rows.

use chrono::NaiveDate;

use crate::error::{Result, TriageError};

/// Default prefix for downloaded export files.
pub const DEFAULT_EXPORT_PREFIX: &str = "kept_contacts";

/// Serialize a header row followed by `rows` as CSV text.
///
/// Cells are written unchanged apart from standard CSV quoting; records end
/// with `\n`. With no headers the output is a single empty line.
pub fn write_csv(headers: &[String], rows: &[Vec<String>]) -> Result<String> {
    if headers.is_empty() {
        return Ok("\n".to_string());
    }

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| TriageError::Persistence(format!("Failed to flush CSV export: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| TriageError::Persistence(format!("CSV export is not UTF-8: {}", e)))
}

/// File name for an export made on `date`, e.g. `kept_contacts_20240131.csv`.
///
/// ```
/// use chrono::NaiveDate;
/// use triage::export::export_file_name;
///
/// let date = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
/// assert_eq!(export_file_name("kept_contacts", date), "kept_contacts_20240131.csv");
/// ```
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y%m%d"))
}
