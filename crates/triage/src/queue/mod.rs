//! Record queue and keep/skip classifier.
//!
//! A table is ingested into a FIFO of pending rows. Rows are drawn one at a
//! time into a single in-flight record, edited, and filed into either the
//! kept or the skipped list.
//!
//! ```text
//!                 draw_next                 classify(keep|skip)
//!   pending ───────────────► in-flight ───────────────────────► kept / skipped
//!                                                                   ▲     │
//!                                                                   └─────┘
//!                                                                 reclassify
//! ```
//!
//! # Usage
//!
//! ```
//! use triage::{DataTable, Decision, QueueState};
//!
//! let mut state = QueueState::new();
//! state.ingest(
//!     DataTable::new(
//!         vec!["Company".into(), "Website".into()],
//!         vec![vec!["Acme".into(), "acme.com".into()]],
//!     ),
//!     None,
//! );
//!
//! let record = state.draw_next().into_record().unwrap();
//! state.classify(Decision::Keep, &record, None);
//!
//! assert_eq!(state.export_csv().unwrap(), "Company,Website\nAcme,acme.com\n");
//! ```

mod decision;
mod state;

pub use decision::Decision;
pub use state::{Draw, QueueState, Record, Row, Snapshot, STATE_VERSION};
