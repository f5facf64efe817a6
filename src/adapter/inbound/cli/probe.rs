//! Handler for the `probe` command.

use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::output;
use crate::error::{Result, VenueError};
use crate::infrastructure::bootstrap::{build_venue_clients, env_lookup};
use crate::infrastructure::config::settings::Config;
use crate::port::QuoteSource;

/// Resolve each venue's markets endpoint and report the pinned URL.
///
/// Fails only when no venue resolves at all.
pub async fn execute(config_path: &Path) -> Result<()> {
    let config = Config::load(config_path)?;
    let clients = build_venue_clients(&config, env_lookup)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Endpoints");

    let mut results = Vec::with_capacity(clients.len());
    let mut last_failure = None;
    for client in &clients {
        let venue = client.venue().to_string();
        match client.resolve_markets().await {
            Ok(endpoint) => {
                output::success(&format!("{venue} {}", output::muted(endpoint.url())));
                results.push(json!({ "venue": venue, "ok": true, "url": endpoint.url() }));
            }
            Err(err) => {
                output::error(&format!("{venue}: {err}"));
                if output::verbosity() > 0 {
                    for failure in &err.failures {
                        output::lines(&format!("{} {}", failure.url, output::muted(&failure.error)));
                    }
                }
                results.push(json!({ "venue": venue, "ok": false, "error": err.to_string() }));
                last_failure = Some(err);
            }
        }
    }

    if output::is_json() {
        output::json_output(json!({ "command": "probe", "venues": results }));
    }

    let resolved = results.iter().filter(|result| result["ok"] == true).count();
    match last_failure {
        Some(err) if resolved == 0 => Err(VenueError::NoEndpoint(err).into()),
        _ => Ok(()),
    }
}
