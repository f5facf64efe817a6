//! Venue ports for market data.

use async_trait::async_trait;

use crate::domain::{EndpointCandidate, Quote, VenueId};
use crate::error::VenueError;

/// Source of normalized quotes for one venue.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// The venue this source reads from.
    fn venue(&self) -> &VenueId;

    /// Fetch the venue's current open markets as quotes.
    ///
    /// No internal retries: a failure skips the venue for one cycle.
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, VenueError>;
}

/// Issues a lightweight, idempotent request against one endpoint candidate.
#[async_trait]
pub trait EndpointProbe: Send + Sync {
    /// `Ok` when the candidate answered with a success status.
    async fn probe(&self, candidate: &EndpointCandidate) -> Result<(), String>;
}
