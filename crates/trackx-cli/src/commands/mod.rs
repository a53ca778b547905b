//! Command implementations

mod extract;
mod formats;
mod inspect;

use std::path::Path;

use anyhow::{Context, Result};
use trackx_core::config::LayeredConfig;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Extract(args) => extract::execute(args, cli.config.as_deref(), &output),
        Commands::Inspect(args) => inspect::execute(args, &output),
        Commands::Formats => formats::execute(&output),
    }
}

/// Assemble the file and environment layers of the configuration.
///
/// An explicitly requested config file must exist; without `--config`,
/// `trackx.toml` in the working directory is picked up when present.
fn load_layered_config(config_path: Option<&Path>) -> Result<LayeredConfig> {
    let config = LayeredConfig::with_defaults();

    let config = match config_path {
        Some(path) => config
            .load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => {
            let default_path = Path::new("trackx.toml");
            if default_path.exists() {
                config.load_from_file(default_path).context("Failed to load trackx.toml")?
            } else {
                config
            }
        }
    };

    Ok(config.load_from_env())
}
