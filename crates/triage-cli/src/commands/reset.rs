//! Reset command - delete the review state.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use colored::Colorize;
use triage::{ReviewSession, SessionConfig};

pub fn run(state_path: PathBuf, yes: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut session = ReviewSession::from_config(&SessionConfig::new().with_state_path(&state_path));
    let snapshot = session.snapshot();

    if !yes && !snapshot.is_empty() {
        print!(
            "Delete {} ({} pending, {} kept, {} skipped)? [y/N] ",
            state_path.display(),
            snapshot.pending,
            snapshot.kept_count,
            snapshot.skipped_count
        );
        io::stdout().flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        if !matches!(answer.trim().to_lowercase().as_str(), "y" | "yes") {
            println!("Aborted.");
            return Ok(());
        }
    }

    session.reset()?;
    println!("{} {}", "Deleted".red().bold(), state_path.display());

    Ok(())
}
