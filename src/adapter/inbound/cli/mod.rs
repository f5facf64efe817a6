//! CLI module graph.

pub mod command;
pub mod output;
pub mod probe;
pub mod run;
pub mod tiers;

use self::command::{Cli, Commands};
use self::output::OutputConfig;
use crate::error::Result;

/// Dispatch a parsed command line.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose));
    match cli.command {
        Commands::Run(args) => run::execute(&cli.config, &args).await,
        Commands::Probe => probe::execute(&cli.config).await,
        Commands::Tiers => tiers::execute(),
    }
}
