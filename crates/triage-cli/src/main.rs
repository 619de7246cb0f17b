//! Triage CLI - review contact records and export the ones worth keeping.

mod cli;
mod commands;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let state = cli.state;
    let result = match cli.command {
        Commands::Serve {
            port,
            host,
            no_open,
            in_memory,
        } => commands::serve::run(state, host, port, no_open, in_memory),

        Commands::Ingest { file } => commands::ingest::run(state, file, cli.verbose),

        Commands::Status { json } => commands::status::run(state, json),

        Commands::Export { output } => commands::export::run(state, output),

        Commands::Reset { yes } => commands::reset::run(state, yes),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` overrides the default filter.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "triage=debug,tower_http=debug"
    } else {
        "triage=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
