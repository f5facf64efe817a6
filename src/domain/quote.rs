//! Normalized venue quotes.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::id::VenueId;
use super::money::{probability, Price};

/// A single market quote, normalized across venues.
///
/// A missing price means the venue has no liquidity or no quote for that
/// side. It is never the same thing as a zero price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    venue: VenueId,
    ticker: String,
    title: String,
    yes_price: Option<Price>,
    no_price: Option<Price>,
    observed_at: DateTime<Utc>,
}

impl Quote {
    /// Create a new quote. Prices outside `[0, 1]` are dropped to absent.
    #[must_use]
    pub fn new(
        venue: VenueId,
        ticker: impl Into<String>,
        title: impl Into<String>,
        yes_price: Option<Decimal>,
        no_price: Option<Decimal>,
        observed_at: DateTime<Utc>,
    ) -> Self {
        Self {
            venue,
            ticker: ticker.into(),
            title: title.into(),
            yes_price: yes_price.and_then(probability),
            no_price: no_price.and_then(probability),
            observed_at,
        }
    }

    /// Get the venue this quote came from.
    #[must_use]
    pub fn venue(&self) -> &VenueId {
        &self.venue
    }

    /// Get the venue-specific market ticker.
    #[must_use]
    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    /// Get the human-readable market title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the YES price, if quoted.
    #[must_use]
    pub fn yes_price(&self) -> Option<Price> {
        self.yes_price
    }

    /// Get the NO price, if quoted.
    #[must_use]
    pub fn no_price(&self) -> Option<Price> {
        self.no_price
    }

    /// Get the time the quote was observed.
    #[must_use]
    pub fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Price of the YES outcome usable for cross-venue comparison.
    ///
    /// Falls back to the complement of the NO price when only the NO side
    /// is quoted.
    #[must_use]
    pub fn comparable_yes_price(&self) -> Option<Price> {
        self.yes_price
            .or_else(|| self.no_price.map(|no| Decimal::ONE - no))
    }
}
