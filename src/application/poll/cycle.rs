//! One fetch, classify, dispatch pass over every venue.

use std::sync::Arc;

use futures_util::stream::{self, StreamExt};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, warn};

use super::report::CycleReport;
use super::state::PollState;
use crate::application::alert::AlertDispatcher;
use crate::domain::{Classification, NoOpportunity, Opportunity, PairMatcher, Quote, SpreadClassifier, VenueId};
use crate::port::QuoteSource;

/// Everything a cycle needs, shared across cycles.
pub struct PollCycle {
    sources: Vec<Arc<dyn QuoteSource>>,
    matcher: PairMatcher,
    classifier: SpreadClassifier,
    dispatcher: Arc<AlertDispatcher>,
    max_concurrent_fetches: usize,
}

impl PollCycle {
    #[must_use]
    pub fn new(
        sources: Vec<Arc<dyn QuoteSource>>,
        matcher: PairMatcher,
        classifier: SpreadClassifier,
        dispatcher: Arc<AlertDispatcher>,
        max_concurrent_fetches: usize,
    ) -> Self {
        Self {
            sources,
            matcher,
            classifier,
            dispatcher,
            max_concurrent_fetches: max_concurrent_fetches.max(1),
        }
    }

    /// Venue ids in fetch order.
    #[must_use]
    pub fn venues(&self) -> Vec<VenueId> {
        self.sources.iter().map(|source| source.venue().clone()).collect()
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Arc<AlertDispatcher> {
        &self.dispatcher
    }

    /// Run one cycle without state reporting or cancellation.
    pub async fn run_once(&self) -> CycleReport {
        let (state, _) = watch::channel(PollState::Idle);
        let (_stop, shutdown) = watch::channel(false);
        self.run(&state, &shutdown).await
    }

    /// Run one cycle, publishing phase changes to `state`.
    ///
    /// `shutdown` is checked between phases and before each alert. In-flight
    /// requests are allowed to finish.
    pub async fn run(&self, state: &watch::Sender<PollState>, shutdown: &watch::Receiver<bool>) -> CycleReport {
        let started = Instant::now();
        let mut report = CycleReport::default();

        state.send_replace(PollState::Fetching);
        let quotes_by_venue = self.fetch_all(&mut report).await;
        if stop_requested(shutdown) {
            return finish(report, started, true);
        }

        state.send_replace(PollState::Classifying);
        let alertable = self.classify_all(&quotes_by_venue, &mut report);
        if stop_requested(shutdown) {
            return finish(report, started, true);
        }

        state.send_replace(PollState::Dispatching);
        for opportunity in &alertable {
            if stop_requested(shutdown) {
                return finish(report, started, true);
            }
            let outcome = self.dispatcher.dispatch(opportunity).await;
            report.record_dispatch(&outcome);
        }

        state.send_replace(PollState::Idle);
        finish(report, started, false)
    }

    async fn fetch_all(&self, report: &mut CycleReport) -> Vec<(VenueId, Vec<Quote>)> {
        let results: Vec<_> = stream::iter(self.sources.iter().cloned())
            .map(|source| async move {
                let result = source.fetch_quotes().await;
                (source.venue().clone(), result)
            })
            .buffered(self.max_concurrent_fetches)
            .boxed()
            .collect()
            .await;

        let mut quotes_by_venue = Vec::with_capacity(results.len());
        for (venue, result) in results {
            match result {
                Ok(quotes) => {
                    report.venues_ok += 1;
                    report.quotes += quotes.len();
                    quotes_by_venue.push((venue, quotes));
                }
                Err(err) => {
                    report.venues_failed += 1;
                    warn!(venue = %venue, error = %err, "Venue skipped this cycle");
                }
            }
        }
        quotes_by_venue
    }

    fn classify_all(&self, quotes_by_venue: &[(VenueId, Vec<Quote>)], report: &mut CycleReport) -> Vec<Opportunity> {
        let pairs = self.matcher.pair(quotes_by_venue);
        report.pairs_compared = pairs.len();

        let mut alertable = Vec::new();
        for pair in &pairs {
            match self.classifier.classify_pair(&pair.key, &pair.quote_a, &pair.quote_b) {
                Classification::Opportunity(opportunity) => {
                    report.record_tier(opportunity.tier());
                    debug!(
                        key = %opportunity.key(),
                        tier = %opportunity.tier(),
                        spread_pct = %opportunity.spread_pct(),
                        "Pair classified"
                    );
                    if self.classifier.is_alertable(&opportunity) {
                        alertable.push(opportunity);
                    }
                }
                Classification::NoOpportunity(NoOpportunity::MissingPrice { venue }) => {
                    report.unpriced_pairs += 1;
                    debug!(key = %pair.key, venue = %venue, "Pair has no usable price");
                }
            }
        }
        alertable
    }
}

fn stop_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow()
}

fn finish(mut report: CycleReport, started: Instant, cancelled: bool) -> CycleReport {
    report.cancelled = cancelled;
    report.elapsed = started.elapsed();
    report
}
