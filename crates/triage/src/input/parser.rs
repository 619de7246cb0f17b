//! Table parser for delimited text and XLSX uploads.

use std::fs;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;

use calamine::{Data, Reader, Xlsx};
use sha2::{Digest, Sha256};

use super::source::{DataTable, SourceMetadata, TableFormat};
use crate::error::{Result, TriageError};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use for delimited text (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
    /// Drop body rows whose cells are all empty.
    pub skip_blank_rows: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
            skip_blank_rows: true,
        }
    }
}

/// Decodes uploaded tables into header + rows.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file from disk, choosing the format from its extension.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();

        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        // Reject unknown formats before touching the file
        TableFormat::from_file_name(&name)?;

        let contents = fs::read(path).map_err(|e| TriageError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.parse_upload(&name, &contents)
    }

    /// Parse uploaded bytes, choosing the format from the uploaded file name.
    pub fn parse_upload(&self, name: &str, bytes: &[u8]) -> Result<(DataTable, SourceMetadata)> {
        let format = TableFormat::from_file_name(name)?;

        let mut hasher = Sha256::new();
        hasher.update(bytes);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let (table, label) = match format {
            TableFormat::Delimited => {
                let (table, delimiter) = self.parse_delimited(bytes)?;
                (table, delimiter_label(delimiter))
            }
            TableFormat::Xlsx => (self.parse_xlsx(bytes)?, "xlsx"),
        };

        let file = Path::new(name)
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| name.to_string());

        let metadata = SourceMetadata::new(
            file,
            label,
            hash,
            bytes.len() as u64,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, metadata))
    }

    /// Parse delimited text. Returns the table and the delimiter used.
    fn parse_delimited(&self, bytes: &[u8]) -> Result<(DataTable, u8)> {
        let decoded = String::from_utf8_lossy(bytes);
        let text = decoded.strip_prefix('\u{feff}').unwrap_or(&decoded[..]);

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(text.as_bytes())?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(text.as_bytes());

        let mut records = reader.records();

        let headers = match records.next() {
            Some(record) => normalize_headers(record?.iter().map(|s| s.to_string()).collect()),
            None => return Err(TriageError::EmptyData("No header row found".to_string())),
        };

        let mut rows = Vec::new();
        for result in records {
            let record = result?;
            let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
            if self.keep_row(&row) {
                rows.push(row);
            }
        }

        Ok((DataTable::new(headers, rows), delimiter))
    }

    /// Parse the first worksheet of an XLSX workbook.
    fn parse_xlsx(&self, bytes: &[u8]) -> Result<DataTable> {
        let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))
            .map_err(|e| TriageError::Spreadsheet(format!("Failed to open workbook: {}", e)))?;

        let range = workbook
            .worksheet_range_at(0)
            .ok_or_else(|| TriageError::EmptyData("Workbook has no worksheets".to_string()))?
            .map_err(|e| TriageError::Spreadsheet(format!("Failed to read worksheet: {}", e)))?;

        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>());

        let headers = match rows.next() {
            Some(row) => normalize_headers(row),
            None => return Err(TriageError::EmptyData("No header row found".to_string())),
        };

        let rows: Vec<Vec<String>> = rows.filter(|row| self.keep_row(row)).collect();

        Ok(DataTable::new(headers, rows))
    }

    fn keep_row(&self, row: &[String]) -> bool {
        !self.config.skip_blank_rows || row.iter().any(|cell| !cell.trim().is_empty())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a worksheet cell as text; empty cells become "".
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Trim header names and name blank ones after their position.
fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    raw.into_iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                format!("column_{}", i + 1)
            } else {
                h.to_string()
            }
        })
        .collect()
}

fn delimiter_label(delimiter: u8) -> &'static str {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TriageError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        // Consistent counts across lines beat a high count on one line
        let consistent = counts.iter().all(|&c| c == first_count);
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
