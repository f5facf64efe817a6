//! Polymarket market normalization (Gamma API, public).

pub mod dto;

use chrono::{DateTime, Utc};

use self::dto::response::GammaMarket;
use crate::domain::{Quote, VenueId};

pub const DEFAULT_BASE_URLS: [&str; 1] = ["https://gamma-api.polymarket.com"];

/// Convert Gamma markets into quotes. Closed or inactive markets are skipped.
#[must_use]
pub fn normalize(venue: &VenueId, markets: Vec<GammaMarket>, observed_at: DateTime<Utc>) -> Vec<Quote> {
    markets
        .into_iter()
        .filter(|market| market.active && !market.closed)
        .map(|market| {
            let yes = market.price_of("Yes");
            let no = market.price_of("No");
            let title = market
                .question
                .clone()
                .or_else(|| market.slug.clone())
                .unwrap_or_else(|| market.condition_id.clone());
            Quote::new(venue.clone(), market.condition_id, title, yes, no, observed_at)
        })
        .collect()
}
