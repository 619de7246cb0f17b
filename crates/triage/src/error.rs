//! Error types for the Triage library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Triage operations.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error decoding a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no header row.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error saving or deleting the persisted snapshot.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Result type alias for Triage operations.
pub type Result<T> = std::result::Result<T, TriageError>;
