//! Composition root: turns a validated [`Config`] into runtime components.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::auth::RequestSigner;
use crate::adapter::outbound::venue::{Access, VenueClient, VenueConfig};
use crate::adapter::outbound::webhook::WebhookTransport;
use crate::application::alert::AlertDispatcher;
use crate::application::poll::PollCycle;
use crate::domain::{PairMatcher, SpreadClassifier};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::{AlertTransport, QuoteSource};

/// Read a process environment variable.
#[must_use]
pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Build the access mode of one venue.
///
/// An authenticated venue whose key cannot be resolved is a startup error.
pub fn build_access<F>(venue: &VenueConfig, lookup: F) -> Result<Access>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(auth) = &venue.auth else {
        return Ok(Access::Public);
    };
    let credential = auth.credential(lookup)?;
    info!(
        venue = %venue.name,
        key_id = %credential.key_id(),
        scheme = ?auth.scheme,
        "Request signing enabled"
    );
    let signer = RequestSigner::new(credential, auth.scheme, auth.header_names(venue.kind));
    Ok(Access::Authenticated(Arc::new(signer)))
}

/// One client per enabled venue, in configured order.
pub fn build_venue_clients<F>(config: &Config, lookup: F) -> Result<Vec<Arc<VenueClient>>>
where
    F: Fn(&str) -> Option<String>,
{
    config
        .enabled_venues()
        .map(|venue| {
            let access = build_access(venue, &lookup)?;
            Ok(Arc::new(VenueClient::from_config(venue, access)))
        })
        .collect()
}

/// Build the alert dispatcher. A missing webhook URL leaves it unconfigured.
pub fn build_dispatcher<F>(config: &Config, lookup: F) -> AlertDispatcher
where
    F: Fn(&str) -> Option<String>,
{
    let transport: Option<Arc<dyn AlertTransport>> = match config.alerts.webhook_url(lookup) {
        Some(url) => Some(Arc::new(WebhookTransport::new(url, config.alerts.timeout()))),
        None => {
            warn!("No webhook URL configured, alerts will only be logged");
            None
        }
    };
    AlertDispatcher::new(transport, config.alerts.dispatcher_settings())
}

/// Build the poll cycle from configuration.
pub fn build_poll_cycle<F>(config: &Config, lookup: F) -> Result<PollCycle>
where
    F: Fn(&str) -> Option<String>,
{
    let sources: Vec<Arc<dyn QuoteSource>> = build_venue_clients(config, &lookup)?
        .into_iter()
        .map(|client| client as Arc<dyn QuoteSource>)
        .collect();
    let matcher = PairMatcher::new(config.aliases(), config.classifier.match_by_title);
    let classifier = SpreadClassifier::new(config.classifier.min_alert_tier);
    let dispatcher = Arc::new(build_dispatcher(config, &lookup));

    info!(
        venues = sources.len(),
        aliases = matcher.alias_count(),
        min_alert_tier = %classifier.min_alert_tier(),
        alerts_configured = dispatcher.is_configured(),
        "Poll cycle assembled"
    );

    Ok(PollCycle::new(
        sources,
        matcher,
        classifier,
        dispatcher,
        config.poll.max_concurrent_fetches,
    ))
}
