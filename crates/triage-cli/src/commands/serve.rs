//! Serve command - open the web UI for reviewing records.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use colored::Colorize;
use triage::{MemoryStore, ReviewSession, SessionConfig};

use crate::server::{app, state::AppState};

pub fn run(
    state_path: PathBuf,
    host: String,
    port: u16,
    no_open: bool,
    in_memory: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let ip: IpAddr = host
        .parse()
        .map_err(|e| format!("Invalid host address '{}': {}", host, e))?;
    let addr = SocketAddr::new(ip, port);

    let session = if in_memory {
        ReviewSession::open(MemoryStore::new())
    } else {
        ReviewSession::from_config(&SessionConfig::new().with_state_path(&state_path))
    };

    let snapshot = session.snapshot();
    let url = format!("http://{}", addr);

    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  State: {}", session.store_location());
    if !snapshot.is_empty() {
        println!(
            "  Resuming: {} pending, {} kept, {} skipped",
            snapshot.pending, snapshot.kept_count, snapshot.skipped_count
        );
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(AppState::new(session), addr))?;

    Ok(())
}
