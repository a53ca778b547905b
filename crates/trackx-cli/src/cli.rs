use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// TrackX - GPS record extraction for vehicle-tracking forensics
#[derive(Parser, Debug)]
#[command(name = "trackx")]
#[command(about = "Extract GPS records from vehicle-tracking reports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML config file (falls back to trackx.toml if present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract GPS records from a tracking report
    Extract(ExtractArgs),

    /// Validate a file and report what a reader sees in it
    Inspect(InspectArgs),

    /// List supported input formats
    Formats,
}

#[derive(Parser, Debug)]
pub struct ExtractArgs {
    /// Path to the tracking report (PDF, CSV, TXT or LOG)
    pub file: PathBuf,

    /// Write the extraction (or case payload) as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Incident date (YYYY-MM-DD); required when building a case payload
    #[arg(long, value_name = "DATE")]
    pub date: Option<String>,

    /// Case reference number
    #[arg(long, value_name = "NUMBER")]
    pub case_number: Option<String>,

    /// Case title
    #[arg(long, value_name = "TITLE")]
    pub title: Option<String>,

    /// Region the investigation covers
    #[arg(long, value_name = "REGION")]
    pub region: Option<String>,

    /// Parties involved, e.g. "State v Smith"
    #[arg(long, value_name = "PARTIES")]
    pub between: Option<String>,

    /// Urgency level for the case payload
    #[arg(long, value_name = "LEVEL", default_value = "normal")]
    pub urgency: String,

    /// Override the duplicate threshold in decimal degrees
    #[arg(long, value_name = "DEGREES")]
    pub dedup_degrees: Option<f64>,

    /// Override the duplicate radius in meters
    #[arg(long, value_name = "METERS")]
    pub dedup_radius_m: Option<f64>,

    /// Override the characters of context kept before a match
    #[arg(long, value_name = "CHARS")]
    pub context_before: Option<usize>,

    /// Override the characters of context kept after a match
    #[arg(long, value_name = "CHARS")]
    pub context_after: Option<usize>,
}

#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// Path to the file to inspect
    pub file: PathBuf,
}
