//! Review session: the queue state plus the store it is persisted to.

use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::Result;
use crate::export::{self, DEFAULT_EXPORT_PREFIX};
use crate::input::{DataTable, Parser, SourceMetadata};
use crate::queue::{Decision, Draw, QueueState, Record, Row, Snapshot};
use crate::store::{JsonFileStore, SnapshotStore};

/// Result of ingesting a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestSummary {
    /// Column headers of the new table.
    pub headers: Vec<String>,
    /// Rows queued for review.
    pub pending: usize,
}

/// Both decision lists after a classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Lists {
    pub kept: Vec<Row>,
    pub skipped: Vec<Row>,
}

/// Owns the queue state and saves it after every mutation.
///
/// State is loaded once when the session is opened. Save failures are
/// logged and otherwise ignored; the in-memory state stays authoritative.
pub struct ReviewSession {
    state: QueueState,
    store: Box<dyn SnapshotStore>,
    parser: Parser,
    export_prefix: String,
}

impl ReviewSession {
    /// Open a session on `store`, loading whatever it holds.
    pub fn open(store: impl SnapshotStore + 'static) -> Self {
        let state = store.load().unwrap_or_default();
        info!(
            store = %store.location(),
            pending = state.pending.len(),
            kept = state.kept.len(),
            skipped = state.skipped.len(),
            "Opened review session"
        );

        Self {
            state,
            store: Box::new(store),
            parser: Parser::new(),
            export_prefix: DEFAULT_EXPORT_PREFIX.to_string(),
        }
    }

    /// Open a session backed by the JSON state file named in `config`.
    pub fn from_config(config: &SessionConfig) -> Self {
        let mut session = Self::open(JsonFileStore::new(&config.state_path));
        session.parser = Parser::with_config(config.parser.clone());
        session.export_prefix = config.export_prefix.clone();
        session
    }

    /// Discard in-memory state and re-read the store.
    pub fn reload(&mut self) {
        self.state = self.store.load().unwrap_or_default();
    }

    /// The current state.
    pub fn state(&self) -> &QueueState {
        &self.state
    }

    /// Where the state is persisted.
    pub fn store_location(&self) -> String {
        self.store.location()
    }

    /// Replace all state with `table`.
    pub fn ingest(&mut self, table: DataTable, source: Option<SourceMetadata>) -> IngestSummary {
        let pending = self.state.ingest(table, source);
        info!(
            columns = self.state.headers.len(),
            pending, "Ingested table"
        );
        self.persist();

        IngestSummary {
            headers: self.state.headers.clone(),
            pending,
        }
    }

    /// Parse uploaded bytes and ingest them.
    ///
    /// The upload is fully parsed before any state is replaced, so a
    /// rejected upload leaves the previous table untouched.
    pub fn ingest_upload(&mut self, name: &str, bytes: &[u8]) -> Result<IngestSummary> {
        let (table, source) = self.parser.parse_upload(name, bytes)?;
        Ok(self.ingest(table, Some(source)))
    }

    /// Parse a file from disk and ingest it.
    pub fn ingest_file(&mut self, path: impl AsRef<Path>) -> Result<IngestSummary> {
        let (table, source) = self.parser.parse_file(path)?;
        Ok(self.ingest(table, Some(source)))
    }

    /// Present the next record; see [`QueueState::draw_next`].
    pub fn draw_next(&mut self) -> Draw {
        let draw = self.state.draw_next();
        if draw.changed_state() {
            debug!(pending = self.state.pending.len(), "Drew next record");
            self.persist();
        }
        draw
    }

    /// File an edited record; see [`QueueState::classify`].
    pub fn classify(
        &mut self,
        decision: Decision,
        fields: &Record,
        original: Option<&[String]>,
    ) -> Lists {
        let row = self.state.classify(decision, fields, original);
        debug!(
            decision = %decision,
            reclassified = original.is_some(),
            first_cell = row.first().map(String::as_str).unwrap_or(""),
            "Classified record"
        );
        self.persist();

        Lists {
            kept: self.state.kept.clone(),
            skipped: self.state.skipped.clone(),
        }
    }

    /// Read-only view for display.
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    /// Kept rows as CSV text.
    pub fn export_csv(&self) -> Result<String> {
        self.state.export_csv()
    }

    /// Download file name for an export made on `date`.
    pub fn export_file_name(&self, date: NaiveDate) -> String {
        export::export_file_name(&self.export_prefix, date)
    }

    /// Clear everything and delete the persisted snapshot.
    pub fn reset(&mut self) -> Result<()> {
        self.state.clear();
        self.store.delete()?;
        info!(store = %self.store.location(), "Reset review state");
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.state) {
            warn!(store = %self.store.location(), error = %e, "Failed to persist state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TriageError;
    use crate::store::MemoryStore;
    use std::sync::Arc;

    /// Store handle that lets the test inspect what the session saved.
    struct Shared(Arc<MemoryStore>);

    impl SnapshotStore for Shared {
        fn load(&self) -> Option<QueueState> {
            self.0.load()
        }
        fn save(&self, state: &QueueState) -> Result<()> {
            self.0.save(state)
        }
        fn delete(&self) -> Result<()> {
            self.0.delete()
        }
        fn location(&self) -> String {
            self.0.location()
        }
    }

    /// Store whose saves always fail.
    struct Broken;

    impl SnapshotStore for Broken {
        fn load(&self) -> Option<QueueState> {
            None
        }
        fn save(&self, _state: &QueueState) -> Result<()> {
            Err(TriageError::Persistence("disk full".to_string()))
        }
        fn delete(&self) -> Result<()> {
            Ok(())
        }
        fn location(&self) -> String {
            "broken".to_string()
        }
    }

    const CSV: &[u8] = b"Company,Website\nAcme,acme.com\nGlobex,globex.com\n";

    #[test]
    fn test_every_mutation_is_saved() {
        let store = Arc::new(MemoryStore::new());
        let mut session = ReviewSession::open(Shared(store.clone()));

        session.ingest_upload("leads.csv", CSV).unwrap();
        assert_eq!(store.saved_pending(), Some(2));

        session.draw_next();
        assert_eq!(store.saved_pending(), Some(1));
        assert!(store.load().unwrap().current.is_some());

        let record = session.state().current.clone().unwrap();
        session.classify(Decision::Keep, &record, None);
        let saved = store.load().unwrap();
        assert!(saved.current.is_none());
        assert_eq!(saved.kept.len(), 1);
    }

    #[test]
    fn test_rejected_upload_preserves_state() {
        let mut session = ReviewSession::open(MemoryStore::new());
        session.ingest_upload("leads.csv", CSV).unwrap();

        let err = session.ingest_upload("leads.pdf", b"%PDF-1.4").unwrap_err();
        assert!(matches!(err, TriageError::UnsupportedFormat(_)));
        assert_eq!(session.snapshot().pending, 2);
        assert_eq!(session.state().headers, vec!["Company", "Website"]);
    }

    #[test]
    fn test_save_failure_is_not_fatal() {
        let mut session = ReviewSession::open(Broken);
        let summary = session.ingest_upload("leads.csv", CSV).unwrap();

        assert_eq!(summary.pending, 2);
        assert!(session.draw_next().record().is_some());
    }

    #[test]
    fn test_reload_reads_store_again() {
        let store = Arc::new(MemoryStore::new());
        let mut session = ReviewSession::open(Shared(store.clone()));
        session.ingest_upload("leads.csv", CSV).unwrap();

        store.delete().unwrap();
        session.reload();

        assert!(session.snapshot().is_empty());
    }

    #[test]
    fn test_export_file_name_uses_prefix() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = SessionConfig::new()
            .with_state_path(dir.path().join("state.json"))
            .with_export_prefix("leads");
        let session = ReviewSession::from_config(&config);

        assert!(session.snapshot().is_empty());
        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        assert_eq!(session.export_file_name(date), "leads_20250309.csv");
    }
}
