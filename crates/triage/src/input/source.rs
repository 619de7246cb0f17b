//! Parsed tables, upload formats and source metadata.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TriageError};

/// Upload formats the parser understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// Delimited text (CSV, TSV, semicolon or pipe separated).
    Delimited,
    /// Office Open XML workbook (first worksheet only).
    Xlsx,
}

impl TableFormat {
    /// Pick the format implied by a file name's extension.
    ///
    /// ```
    /// use triage::TableFormat;
    ///
    /// assert_eq!(TableFormat::from_file_name("Leads.XLSX").unwrap(), TableFormat::Xlsx);
    /// assert!(TableFormat::from_file_name("leads.pdf").is_err());
    /// ```
    pub fn from_file_name(name: &str) -> Result<Self> {
        let lower = name.to_lowercase();
        let ext = lower.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");

        match ext {
            "csv" | "tsv" | "txt" => Ok(TableFormat::Delimited),
            "xlsx" => Ok(TableFormat::Xlsx),
            _ => Err(TriageError::UnsupportedFormat(format!(
                "'{}' (expected .csv, .tsv, .txt or .xlsx)",
                name
            ))),
        }
    }
}

impl fmt::Display for TableFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableFormat::Delimited => write!(f, "delimited"),
            TableFormat::Xlsx => write!(f, "xlsx"),
        }
    }
}

/// Metadata about an ingested table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name as uploaded, without any directory.
    pub file: String,
    /// Detected format (csv, tsv, xlsx, ...).
    pub format: String,
    /// SHA-256 hash of the uploaded bytes.
    pub hash: String,
    /// Upload size in bytes.
    pub size_bytes: u64,
    /// Number of body rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the table was ingested.
    pub ingested_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a table that has just been parsed.
    pub fn new(
        file: impl Into<String>,
        format: impl Into<String>,
        hash: String,
        size_bytes: u64,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        Self {
            file: file.into(),
            format: format.into(),
            hash,
            size_bytes,
            row_count,
            column_count,
            ingested_at: Utc::now(),
        }
    }
}

/// A decoded table: one header row plus body rows of strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    /// Create a table, normalizing every row to the header width.
    ///
    /// Short rows are padded with empty strings and surplus cells dropped.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(TableFormat::from_file_name("a.csv").unwrap(), TableFormat::Delimited);
        assert_eq!(TableFormat::from_file_name("a.TSV").unwrap(), TableFormat::Delimited);
        assert_eq!(TableFormat::from_file_name("dir.v2/a.xlsx").unwrap(), TableFormat::Xlsx);
        assert!(matches!(
            TableFormat::from_file_name("a.xls"),
            Err(TriageError::UnsupportedFormat(_))
        ));
        assert!(TableFormat::from_file_name("noext").is_err());
    }

    #[test]
    fn test_rows_normalized_to_header_width() {
        let table = DataTable::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
        );

        assert_eq!(table.rows[0], vec!["1", ""]);
        assert_eq!(table.rows[1], vec!["1", "2"]);
        assert_eq!(table.get(0, 1), Some(""));
        assert_eq!(table.column_count(), 2);
    }
}
