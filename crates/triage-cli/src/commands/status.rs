//! Status command - show review progress.

use std::path::PathBuf;

use colored::Colorize;
use triage::{Decision, ReviewSession, SessionConfig};

pub fn run(state_path: PathBuf, json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let session = ReviewSession::from_config(&SessionConfig::new().with_state_path(&state_path));
    let snapshot = session.snapshot();

    if json_output {
        let status = serde_json::json!({
            "state": session.store_location(),
            "headers": snapshot.headers,
            "pending": snapshot.pending,
            "in_flight": snapshot.in_flight,
            "kept": snapshot.kept_count,
            "skipped": snapshot.skipped_count,
            "progress": snapshot.progress(),
            "source": snapshot.source,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    if snapshot.is_empty() {
        println!(
            "{} No review in progress at {}",
            "Note:".yellow(),
            session.store_location()
        );
        println!(
            "Run {} to load a table.",
            "triage ingest <FILE>".cyan()
        );
        return Ok(());
    }

    match &snapshot.source {
        Some(source) => println!(
            "{} {} ({})",
            "Review status for".cyan().bold(),
            source.file.white(),
            source.format
        ),
        None => println!("{}", "Review status".cyan().bold()),
    }
    println!();

    // Progress bar
    let progress = snapshot.progress();
    let total = snapshot.reviewed() + snapshot.pending + usize::from(snapshot.in_flight);
    let bar_width = 30;
    let filled = (progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Progress: {} {}/{} ({:.0}%)",
        bar.cyan(),
        snapshot.reviewed().to_string().white().bold(),
        total,
        progress * 100.0
    );
    println!();
    println!("  {} {}", format!("{}:", Decision::Keep.label()).green(), snapshot.kept_count);
    println!("  {} {}", format!("{}:", Decision::Skip.label()).yellow(), snapshot.skipped_count);
    println!("  {} {}", "Pending:".white(), snapshot.pending);
    if snapshot.in_flight {
        println!("  {} 1 record open for review", "In flight:".white());
    }
    println!();
    println!("  Columns: {}", snapshot.headers.join(", "));
    println!("  State: {}", session.store_location());

    Ok(())
}
