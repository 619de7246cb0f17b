//! Ingest command - load a table into the review queue.

use std::path::PathBuf;

use colored::Colorize;
use triage::{ReviewSession, SessionConfig};

pub fn run(
    state_path: PathBuf,
    file: PathBuf,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut session = ReviewSession::from_config(&SessionConfig::new().with_state_path(&state_path));

    let previous = session.snapshot();
    if !previous.is_empty() {
        println!(
            "{} Replacing review in progress ({} pending, {} kept, {} skipped)",
            "Note:".yellow(),
            previous.pending,
            previous.kept_count,
            previous.skipped_count
        );
    }

    let summary = session.ingest_file(&file)?;

    println!(
        "{} {} records from {}",
        "Loaded".green().bold(),
        summary.pending.to_string().white().bold(),
        file.display()
    );
    if verbose {
        println!("  Columns: {}", summary.headers.join(", "));
    }
    println!("  State: {}", session.store_location());

    Ok(())
}
