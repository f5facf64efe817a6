//! Poll loop and classifier configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::domain::SpreadTier;

/// `[poll]`: cycle period and fetch fan-out.
#[derive(Debug, Clone, Deserialize)]
pub struct PollConfig {
    /// Fixed cycle period in seconds.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
    /// Upper bound on venues fetched at once.
    #[serde(default = "default_max_concurrent_fetches")]
    pub max_concurrent_fetches: usize,
}

const fn default_interval_secs() -> u64 {
    30
}

const fn default_max_concurrent_fetches() -> usize {
    4
}

impl PollConfig {
    #[must_use]
    pub const fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
            max_concurrent_fetches: default_max_concurrent_fetches(),
        }
    }
}

/// `[classifier]`: alert floor and pairing mode.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default)]
    pub min_alert_tier: SpreadTier,
    /// Pair quotes by normalized title when no alias matches.
    #[serde(default = "default_match_by_title")]
    pub match_by_title: bool,
}

const fn default_match_by_title() -> bool {
    true
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            min_alert_tier: SpreadTier::default(),
            match_by_title: default_match_by_title(),
        }
    }
}
