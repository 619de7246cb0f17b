//! Export command - write the kept records as CSV.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Local;
use colored::Colorize;
use triage::{ReviewSession, SessionConfig};

pub fn run(state_path: PathBuf, output: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let session = ReviewSession::from_config(&SessionConfig::new().with_state_path(&state_path));
    let csv = session.export_csv()?;

    let output =
        output.unwrap_or_else(|| PathBuf::from(session.export_file_name(Local::now().date_naive())));

    if output.as_os_str() == "-" {
        std::io::stdout().write_all(csv.as_bytes())?;
        return Ok(());
    }

    fs::write(&output, csv).map_err(|e| format!("Failed to write {}: {}", output.display(), e))?;

    println!(
        "{} {} kept records to {}",
        "Exported".green().bold(),
        session.snapshot().kept_count.to_string().white().bold(),
        output.display().to_string().cyan()
    );

    Ok(())
}
