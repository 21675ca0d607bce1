//! Command-line interface definitions.

pub mod run;

use std::path::PathBuf;

use clap::Parser;

/// Real-time, cross-venue box-spread arbitrage scanner for crypto options.
#[derive(Parser, Debug)]
#[command(name = "box-scanner")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty.
    #[arg(long)]
    pub json_logs: bool,
}
