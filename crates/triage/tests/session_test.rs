//! Integration tests for ReviewSession backed by a JSON state file.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use triage::{Decision, JsonFileStore, Record, ReviewSession, SessionConfig, SnapshotStore};

/// Helper to create a temporary CSV file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn record(pairs: &[(&str, &str)]) -> Record {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|s| s.to_string()).collect()
}

fn session_in(dir: &TempDir) -> ReviewSession {
    let config = SessionConfig::new().with_state_path(dir.path().join("state.json"));
    ReviewSession::from_config(&config)
}

const LEADS: &str = "Company,Website\nAcme,acme.com\nGlobex,globex.com\n";

// =============================================================================
// Review walkthrough
// =============================================================================

#[test]
fn test_keep_then_skip_edited_walkthrough() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);

    let summary = session.ingest_upload("leads.csv", LEADS.as_bytes()).unwrap();
    assert_eq!(summary.headers, row(&["Company", "Website"]));
    assert_eq!(summary.pending, 2);

    let acme = session.draw_next().into_record().expect("Acme pending");
    assert_eq!(acme, record(&[("Company", "Acme"), ("Website", "acme.com")]));

    let lists = session.classify(Decision::Keep, &acme, None);
    assert_eq!(lists.kept, vec![row(&["Acme", "acme.com"])]);
    assert_eq!(session.snapshot().pending, 1);

    let globex = session.draw_next().into_record().expect("Globex pending");
    assert_eq!(globex["Company"], "Globex");

    let edited = record(&[("Company", "Globex Corp"), ("Website", "globex.com")]);
    let lists = session.classify(Decision::Skip, &edited, None);
    assert_eq!(lists.skipped, vec![row(&["Globex Corp", "globex.com"])]);

    assert!(session.draw_next().is_done());
    assert_eq!(
        session.export_csv().unwrap(),
        "Company,Website\nAcme,acme.com\n"
    );
}

#[test]
fn test_ingest_from_disk() {
    let dir = TempDir::new().unwrap();
    let file = create_test_file(LEADS);
    let mut session = session_in(&dir);

    let summary = session.ingest_file(file.path()).unwrap();

    assert_eq!(summary.pending, 2);
    let source = session.snapshot().source.expect("source metadata recorded");
    assert_eq!(source.format, "csv");
    assert_eq!(source.row_count, 2);
    assert!(source.file.ends_with(".csv"));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_state_survives_reopen() {
    let dir = TempDir::new().unwrap();

    {
        let mut session = session_in(&dir);
        session.ingest_upload("leads.csv", LEADS.as_bytes()).unwrap();
        let acme = session.draw_next().into_record().unwrap();
        session.classify(Decision::Keep, &acme, None);
        session.draw_next();
    }

    let mut reopened = session_in(&dir);
    let snapshot = reopened.snapshot();
    assert_eq!(snapshot.kept, vec![row(&["Acme", "acme.com"])]);
    assert_eq!(snapshot.pending, 0);
    assert!(snapshot.in_flight);

    // The record in flight at shutdown is presented again, not lost
    let again = reopened.draw_next().into_record().unwrap();
    assert_eq!(again["Company"], "Globex");
}

#[test]
fn test_corrupt_state_file_opens_empty() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("state.json"), "[1, 2, oops").unwrap();

    let session = session_in(&dir);
    let snapshot = session.snapshot();

    assert!(snapshot.is_empty());
    assert!(snapshot.headers.is_empty());
}

#[test]
fn test_reset_deletes_state_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("state.json");
    let mut session = session_in(&dir);

    session.ingest_upload("leads.csv", LEADS.as_bytes()).unwrap();
    assert!(path.exists());

    session.reset().unwrap();

    assert!(!path.exists());
    let snapshot = session.snapshot();
    assert!(snapshot.headers.is_empty());
    assert!(snapshot.kept.is_empty());
    assert!(snapshot.skipped.is_empty());
    assert_eq!(snapshot.pending, 0);

    // Reset with nothing saved is fine
    session.reset().unwrap();
}

#[test]
fn test_saved_file_is_readable_json() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.ingest_upload("leads.csv", LEADS.as_bytes()).unwrap();

    let store = JsonFileStore::new(dir.path().join("state.json"));
    let saved = store.load().expect("state saved");
    assert_eq!(saved.pending.len(), 2);
    assert_eq!(saved.headers, row(&["Company", "Website"]));

    let raw = fs::read_to_string(store.path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["triage_version"], "1.0.0");
    assert_eq!(json["source"]["file"], "leads.csv");
}

// =============================================================================
// Reclassification
// =============================================================================

#[test]
fn test_reclassify_from_list_view() {
    let dir = TempDir::new().unwrap();
    let mut session = session_in(&dir);
    session.ingest_upload("leads.csv", LEADS.as_bytes()).unwrap();

    let acme = session.draw_next().into_record().unwrap();
    session.classify(Decision::Skip, &acme, None);

    // Picked from the skipped list, corrected and kept
    let original = row(&["Acme", "acme.com"]);
    let corrected = record(&[("Company", "Acme"), ("Website", "https://acme.com")]);
    let lists = session.classify(Decision::Keep, &corrected, Some(original.as_slice()));

    assert!(lists.skipped.is_empty());
    assert_eq!(lists.kept, vec![row(&["Acme", "https://acme.com"])]);

    // Reclassifying did not consume the pending Globex row
    assert_eq!(session.snapshot().pending, 1);
}
