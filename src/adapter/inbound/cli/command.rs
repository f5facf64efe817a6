//! Command-line interface definitions.
//!
//! Defines the CLI structure for spreadwatch using `clap`: `run` starts the
//! poll loop, `probe` resolves every venue's endpoints once, and `tiers`
//! prints the spread tier table.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Cross-venue prediction market spread monitor
#[derive(Parser, Debug)]
#[command(name = "spreadwatch")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Poll venues and dispatch spread alerts until interrupted
    Run(RunArgs),

    /// Resolve every venue's market endpoint once and report
    Probe,

    /// Print the spread tier table
    Tiers,
}

/// Arguments for the `run` subcommand.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Use JSON log format instead of pretty-printed logs.
    #[arg(long)]
    pub json_logs: bool,

    /// Run a single cycle and exit.
    #[arg(long)]
    pub once: bool,
}
