//! Per-cycle summary.

use std::collections::BTreeMap;
use std::time::Duration;

use tracing::info;

use crate::application::alert::DispatchOutcome;
use crate::domain::SpreadTier;

/// Counters for one fetch, classify, dispatch cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub venues_ok: usize,
    pub venues_failed: usize,
    pub quotes: usize,
    pub pairs_compared: usize,
    /// Pairs that could not be classified (missing prices).
    pub unpriced_pairs: usize,
    pub tiers: BTreeMap<SpreadTier, usize>,
    pub delivered: usize,
    pub suppressed: usize,
    pub failed: usize,
    pub unconfigured: usize,
    /// The cycle stopped early on a shutdown request.
    pub cancelled: bool,
    pub elapsed: Duration,
}

impl CycleReport {
    pub(crate) fn record_tier(&mut self, tier: SpreadTier) {
        *self.tiers.entry(tier).or_default() += 1;
    }

    pub(crate) fn record_dispatch(&mut self, outcome: &DispatchOutcome) {
        match outcome {
            DispatchOutcome::Delivered { .. } => self.delivered += 1,
            DispatchOutcome::Suppressed => self.suppressed += 1,
            DispatchOutcome::DeliveryFailed { .. } => self.failed += 1,
            DispatchOutcome::Unconfigured => self.unconfigured += 1,
        }
    }

    /// Count of opportunities classified into `tier`.
    #[must_use]
    pub fn tier_count(&self, tier: SpreadTier) -> usize {
        self.tiers.get(&tier).copied().unwrap_or_default()
    }

    /// Opportunities that reached the dispatcher.
    #[must_use]
    pub fn dispatched(&self) -> usize {
        self.delivered + self.suppressed + self.failed + self.unconfigured
    }

    /// Emit the report as one structured log line.
    pub fn log(&self) {
        let tiers = self
            .tiers
            .iter()
            .rev()
            .map(|(tier, count)| format!("{tier}={count}"))
            .collect::<Vec<_>>()
            .join(",");
        info!(
            venues_ok = self.venues_ok,
            venues_failed = self.venues_failed,
            quotes = self.quotes,
            pairs = self.pairs_compared,
            unpriced = self.unpriced_pairs,
            tiers = %tiers,
            delivered = self.delivered,
            suppressed = self.suppressed,
            failed = self.failed,
            unconfigured = self.unconfigured,
            cancelled = self.cancelled,
            elapsed_ms = self.elapsed.as_millis() as u64,
            "Cycle complete"
        );
    }
}
