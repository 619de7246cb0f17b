//! Queue state: pending rows, the in-flight record and the two decision lists.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::export;
use crate::input::{DataTable, SourceMetadata};

use super::decision::Decision;

/// Current version of the persisted state format.
pub const STATE_VERSION: &str = "1.0.0";

/// A row of cells, positionally aligned with the header list.
pub type Row = Vec<String>;

/// A row keyed by header name, in header order.
pub type Record = IndexMap<String, String>;

/// Outcome of drawing the next record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Draw {
    /// A record was already in flight and is returned unchanged.
    InFlight(Record),
    /// The head of the pending queue became the in-flight record.
    Drawn(Record),
    /// Nothing in flight and nothing pending.
    Exhausted,
}

impl Draw {
    /// The record to present, if any.
    pub fn record(&self) -> Option<&Record> {
        match self {
            Draw::InFlight(record) | Draw::Drawn(record) => Some(record),
            Draw::Exhausted => None,
        }
    }

    /// Consume the outcome, returning the record to present.
    pub fn into_record(self) -> Option<Record> {
        match self {
            Draw::InFlight(record) | Draw::Drawn(record) => Some(record),
            Draw::Exhausted => None,
        }
    }

    /// True when there is no record left to review.
    pub fn is_done(&self) -> bool {
        matches!(self, Draw::Exhausted)
    }

    /// True when the draw mutated the queue and must be persisted.
    pub fn changed_state(&self) -> bool {
        matches!(self, Draw::Drawn(_))
    }
}

/// Read-only view of the queue for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Column headers of the current table.
    pub headers: Vec<String>,
    /// Rows not yet drawn.
    pub pending: usize,
    /// Number of kept rows.
    pub kept_count: usize,
    /// Number of skipped rows.
    pub skipped_count: usize,
    /// Kept rows in decision order.
    pub kept: Vec<Row>,
    /// Skipped rows in decision order.
    pub skipped: Vec<Row>,
    /// Whether a record is currently presented for review.
    pub in_flight: bool,
    /// Where the current table came from.
    pub source: Option<SourceMetadata>,
}

impl Snapshot {
    /// True when no table is loaded and nothing has been decided.
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.pending == 0 && self.kept_count == 0 && self.skipped_count == 0
    }

    /// Number of rows already filed into either list.
    pub fn reviewed(&self) -> usize {
        self.kept_count + self.skipped_count
    }

    /// Fraction of the table already reviewed (0.0-1.0).
    pub fn progress(&self) -> f64 {
        let total = self.reviewed() + self.pending + usize::from(self.in_flight);
        if total == 0 {
            0.0
        } else {
            self.reviewed() as f64 / total as f64
        }
    }
}

/// The full queue state; this is the unit that gets persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueState {
    /// Version of the state format.
    pub triage_version: String,

    /// Column headers, fixed per ingested table.
    pub headers: Vec<String>,

    /// Rows awaiting review, oldest first.
    pub pending: VecDeque<Row>,

    /// Rows classified as keep.
    pub kept: Vec<Row>,

    /// Rows classified as skip.
    pub skipped: Vec<Row>,

    /// The record currently presented for editing.
    pub current: Option<Record>,

    /// Metadata about the ingested table.
    pub source: Option<SourceMetadata>,

    /// When the state last changed.
    pub updated_at: Option<DateTime<Utc>>,
}

impl Default for QueueState {
    fn default() -> Self {
        Self {
            triage_version: STATE_VERSION.to_string(),
            headers: Vec::new(),
            pending: VecDeque::new(),
            kept: Vec::new(),
            skipped: Vec::new(),
            current: None,
            source: None,
            updated_at: None,
        }
    }
}

impl QueueState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with a freshly parsed table.
    ///
    /// Returns the number of pending rows.
    pub fn ingest(&mut self, table: DataTable, source: Option<SourceMetadata>) -> usize {
        let DataTable { headers, rows } = table;

        self.headers = headers;
        self.pending = rows.into();
        self.kept.clear();
        self.skipped.clear();
        self.current = None;
        self.source = source;
        self.touch();

        self.pending.len()
    }

    /// Present the next record for review.
    ///
    /// Repeated calls without a decision return the same record, so no row
    /// is ever skipped over.
    pub fn draw_next(&mut self) -> Draw {
        if let Some(current) = &self.current {
            return Draw::InFlight(current.clone());
        }

        match self.pending.pop_front() {
            Some(row) => {
                let record = self.record_from_row(&row);
                self.current = Some(record.clone());
                self.touch();
                Draw::Drawn(record)
            }
            None => Draw::Exhausted,
        }
    }

    /// File an edited record under `decision`.
    ///
    /// `original` is the row as it was before editing when an already
    /// decided row is being reclassified; its first occurrence is removed
    /// from both lists. The in-flight record is always cleared, whether or
    /// not it matches. Returns the row that was filed.
    pub fn classify(
        &mut self,
        decision: Decision,
        fields: &Record,
        original: Option<&[String]>,
    ) -> Row {
        let row = self.project(fields);

        if let Some(original) = original {
            remove_first(&mut self.kept, original);
            remove_first(&mut self.skipped, original);
        }

        remove_first(self.list_mut(decision.opposite()), &row);
        self.list_mut(decision).push(row.clone());

        self.current = None;
        self.touch();

        row
    }

    /// Re-project a header→value mapping onto header order.
    ///
    /// Keys that are not headers are ignored; missing headers become "".
    pub fn project(&self, fields: &Record) -> Row {
        self.headers
            .iter()
            .map(|h| fields.get(h).cloned().unwrap_or_default())
            .collect()
    }

    /// Build a header→value mapping for a row; missing cells become "".
    pub fn record_from_row(&self, row: &[String]) -> Record {
        self.headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), row.get(i).cloned().unwrap_or_default()))
            .collect()
    }

    /// The list a decision files into.
    pub fn list(&self, decision: Decision) -> &[Row] {
        match decision {
            Decision::Keep => &self.kept,
            Decision::Skip => &self.skipped,
        }
    }

    fn list_mut(&mut self, decision: Decision) -> &mut Vec<Row> {
        match decision {
            Decision::Keep => &mut self.kept,
            Decision::Skip => &mut self.skipped,
        }
    }

    /// Number of rows not yet drawn.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Whether a record is currently presented for review.
    pub fn has_in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Read-only view for display.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            headers: self.headers.clone(),
            pending: self.pending.len(),
            kept_count: self.kept.len(),
            skipped_count: self.skipped.len(),
            kept: self.kept.clone(),
            skipped: self.skipped.clone(),
            in_flight: self.current.is_some(),
            source: self.source.clone(),
        }
    }

    /// Header row followed by every kept row, as CSV text.
    pub fn export_csv(&self) -> Result<String> {
        export::write_csv(&self.headers, &self.kept)
    }

    /// Drop all rows, headers and the in-flight record.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }
}

/// Remove the first row equal to `row`. O(n), lists stay human-sized.
fn remove_first(list: &mut Vec<Row>, row: &[String]) -> bool {
    match list.iter().position(|r| r.as_slice() == row) {
        Some(index) => {
            list.remove(index);
            true
        }
        None => false,
    }
}
