//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::sync::OnceLock;

use wot_config::{DEFAULT_CONFIG_FILE, DEFAULT_FUEL_MAP_FILE, DEFAULT_NEW_FUEL_MAP_FILE};

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "wot-tuner",
    version,
    about = "Derive a corrected fuel map from wide-open-throttle AFR logs"
)]
pub struct Cli {
    /// ECU log (CSV) to analyze; exactly one is expected
    #[arg(value_name = "ECU_LOG")]
    pub logs: Vec<PathBuf>,

    /// Tuner configuration (properties, or TOML when the name ends in .toml)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Current fuel map (tab separated)
    #[arg(long = "fuel-map", value_name = "FILE", default_value = DEFAULT_FUEL_MAP_FILE)]
    pub fuel_map: PathBuf,

    /// Where to write the corrected fuel map
    #[arg(long, value_name = "FILE", default_value = DEFAULT_NEW_FUEL_MAP_FILE)]
    pub output: PathBuf,

    /// Compute and print the corrected map without writing it
    #[arg(long, action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Print results (and errors) as JSON instead of tables
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG takes precedence
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Also write JSON-lines diagnostics to this file
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}
