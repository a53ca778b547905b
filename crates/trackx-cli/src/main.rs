//! TrackX CLI - Command-line interface
//!
//! This is the main CLI adapter for the TrackX extraction engine.

mod cli;
mod commands;
mod output;
mod output_types;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

fn main() -> Result<()> {
    // Parse CLI arguments first; -v widens the default log filter
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    // Execute the command
    commands::execute(cli)
}
