//! Triage: review a table of contact records one at a time and sort each
//! into a kept or skipped list.
//!
//! A table (CSV or XLSX) is ingested into a queue of pending rows. Rows are
//! drawn one at a time into an editable record and filed with a keep/skip
//! decision. The kept list exports back to CSV. The whole state is saved to
//! a flat JSON file after every change, so a review can be picked up after a
//! restart.
//!
//! # Example
//!
//! ```no_run
//! use triage::{Decision, ReviewSession, SessionConfig};
//!
//! let mut session = ReviewSession::from_config(&SessionConfig::default());
//! session.ingest_file("contacts.csv").unwrap();
//!
//! while let Some(record) = session.draw_next().into_record() {
//!     session.classify(Decision::Keep, &record, None);
//! }
//!
//! println!("{}", session.export_csv().unwrap());
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod input;
pub mod queue;
pub mod session;
pub mod store;

pub use config::{SessionConfig, DEFAULT_STATE_FILE};
pub use error::{Result, TriageError};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata, TableFormat};
pub use queue::{Decision, Draw, QueueState, Record, Row, Snapshot};
pub use session::{IngestSummary, Lists, ReviewSession};
pub use store::{JsonFileStore, MemoryStore, SnapshotStore};
