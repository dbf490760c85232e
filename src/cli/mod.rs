//! Command-line interface definitions.

pub mod check;
pub mod output;
pub mod rules;
pub mod run;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Marketwatch - periodic market anomaly monitor.
#[derive(Parser, Debug)]
#[command(name = "marketwatch")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the monitor loop (foreground)
    Run(RunArgs),

    /// List the built-in alert rules and their default thresholds
    Rules,

    /// Validate a configuration file
    Check(ConfigPathArg),
}

/// Shared argument for commands that only need a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Print the status table every N seconds
    #[arg(long, value_name = "SECS")]
    pub status_every: Option<u64>,

    /// Override log level (debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty
    #[arg(long)]
    pub json_logs: bool,
}
