//! Bounded, time-windowed alert deduplication.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

use crate::domain::Fingerprint;

#[derive(Debug, Clone, Copy)]
enum Entry {
    Sent(Instant),
    /// A delivery for this fingerprint is in progress.
    InFlight,
}

/// Why a reservation was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// Delivered within the window; carries the delivery time.
    RecentlySent(Instant),
    InFlight,
}

/// Dedup state owned by one dispatcher.
///
/// Expired records are purged on access. When the store is full, the
/// oldest delivered record is evicted.
#[derive(Debug)]
pub struct DedupStore {
    window: Duration,
    capacity: usize,
    entries: HashMap<Fingerprint, Entry>,
}

impl DedupStore {
    #[must_use]
    pub fn new(window: Duration, capacity: usize) -> Self {
        Self {
            window,
            capacity: capacity.max(1),
            entries: HashMap::new(),
        }
    }

    /// Claim the right to deliver `fingerprint` now.
    pub fn try_reserve(&mut self, fingerprint: &Fingerprint, now: Instant) -> Result<(), Refusal> {
        self.purge(now);
        match self.entries.get(fingerprint) {
            Some(Entry::InFlight) => return Err(Refusal::InFlight),
            Some(Entry::Sent(at)) => return Err(Refusal::RecentlySent(*at)),
            None => {}
        }
        if self.entries.len() >= self.capacity {
            self.evict_oldest();
        }
        self.entries.insert(fingerprint.clone(), Entry::InFlight);
        Ok(())
    }

    /// Record a successful delivery.
    pub fn confirm(&mut self, fingerprint: &Fingerprint, sent_at: Instant) {
        self.entries.insert(fingerprint.clone(), Entry::Sent(sent_at));
    }

    /// Drop a reservation after a failed delivery so the next cycle retries.
    pub fn release(&mut self, fingerprint: &Fingerprint) {
        if let Some(Entry::InFlight) = self.entries.get(fingerprint) {
            self.entries.remove(fingerprint);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn purge(&mut self, now: Instant) {
        let window = self.window;
        self.entries.retain(|_, entry| match entry {
            Entry::Sent(at) => now.saturating_duration_since(*at) < window,
            Entry::InFlight => true,
        });
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .filter_map(|(fp, entry)| match entry {
                Entry::Sent(at) => Some((fp, *at)),
                Entry::InFlight => None,
            })
            .min_by_key(|(_, at)| *at)
            .map(|(fp, _)| fp.clone());
        if let Some(fingerprint) = oldest {
            self.entries.remove(&fingerprint);
        }
    }
}
