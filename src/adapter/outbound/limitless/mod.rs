//! Limitless market normalization (public API).
//!
//! The listing path has moved between releases, so the defaults spread the
//! candidates over several bases for the resolver to try in order.

pub mod dto;

use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::debug;

use self::dto::LimitlessMarket;
use crate::domain::{Quote, VenueId};

/// Default API bases, tried in order under each markets path.
pub const DEFAULT_BASE_URLS: [&str; 3] = [
    "https://api.limitless.exchange",
    "https://api.limitless.exchange/api",
    "https://api.limitless.exchange/v1",
];

/// Convert listed markets into quotes. Entries without a ticker are skipped.
#[must_use]
pub fn normalize(venue: &VenueId, items: Vec<Value>, observed_at: DateTime<Utc>) -> Vec<Quote> {
    items
        .into_iter()
        .filter_map(|item| {
            serde_json::from_value::<LimitlessMarket>(item)
                .map_err(|err| debug!(venue = %venue, error = %err, "Skipping malformed market"))
                .ok()
        })
        .filter_map(|market| {
            let ticker = market.ticker()?;
            let title = market.title().unwrap_or_else(|| ticker.clone());
            Some(Quote::new(
                venue.clone(),
                ticker,
                title,
                market.yes_price(),
                market.no_price(),
                observed_at,
            ))
        })
        .collect()
}
