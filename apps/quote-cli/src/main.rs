//! # filmquote
//!
//! Command-line entry point. See the library docs for the commands.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use filmquote_cli::Cli;

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    filmquote_cli::run(cli)?;

    Ok(())
}

/// Initializes tracing/logging. Output goes to stderr; stdout carries JSON.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,filmquote_cli=debug,filmquote_core=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
