//! Handler for the `run` command.

use std::path::Path;
use std::sync::Arc;

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::bootstrap::{build_poll_cycle, env_lookup};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::orchestration::PollLoop;

/// Execute the run command.
pub async fn execute(config_path: &Path, args: &RunArgs) -> Result<()> {
    let mut config = Config::load(config_path)?;
    config.logging = config
        .logging
        .clone()
        .with_overrides(args.log_level.as_deref(), args.json_logs || output::is_json());
    config.init_logging();

    if !config.logging.is_json() {
        print_startup(&config);
    }

    let cycle = Arc::new(build_poll_cycle(&config, env_lookup)?);

    if args.once {
        let report = cycle.run_once().await;
        report.log();
        return Ok(());
    }

    let poll = PollLoop::new(cycle, config.poll.interval()).with_online_message(config.alerts.online_message);
    let (stop, shutdown) = watch::channel(false);

    tokio::spawn(async move {
        match signal::ctrl_c().await {
            Ok(()) => info!("Interrupt received, stopping after the current phase"),
            Err(err) => warn!(error = %err, "Failed to listen for interrupt"),
        }
        stop.send_replace(true);
    });

    poll.run(shutdown).await;
    Ok(())
}

fn print_startup(config: &Config) {
    let venues: Vec<&str> = config.enabled_venues().map(|venue| venue.name.as_str()).collect();
    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Venues", venues.join(", "));
    output::field("Interval", format!("{}s", config.poll.interval_secs));
    output::field("Min tier", config.classifier.min_alert_tier);
    if output::verbosity() > 0 {
        output::field("Pairs", config.pairs.len());
        output::field("Suppress", format!("{}s", config.alerts.suppression_window_secs));
    }
    if config.alerts.webhook_url(env_lookup).is_none() {
        output::warning("No webhook configured - opportunities will only be logged");
    }
}
