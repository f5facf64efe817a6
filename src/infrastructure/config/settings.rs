//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all settings.
//! Configuration is loaded from a TOML file. Secrets (private keys, webhook
//! URLs) are normally referenced by environment variable name and resolved
//! at startup, so the file itself can be committed.
//!
//! # Example
//!
//! ```no_run
//! use spreadwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::alert::AlertConfig;
use super::logging::LoggingConfig;
use super::poll::{ClassifierConfig, PollConfig};
use crate::adapter::outbound::venue::VenueConfig;
use crate::domain::{MarketAlias, MarketKey, VenueId};
use crate::error::{ConfigError, Result};

/// One `[[pairs]]` entry: venue tickers that describe the same market.
#[derive(Debug, Clone, Deserialize)]
pub struct PairConfig {
    /// Canonical market key.
    pub key: String,
    /// Venue name to ticker.
    pub tickers: HashMap<String, String>,
}

impl PairConfig {
    #[must_use]
    pub fn alias(&self) -> MarketAlias {
        MarketAlias {
            key: MarketKey::new(self.key.trim()),
            tickers: self
                .tickers
                .iter()
                .map(|(venue, ticker)| (VenueId::new(venue.clone()), ticker.clone()))
                .collect(),
        }
    }
}

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Both validate before returning.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub poll: PollConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    /// Webhook delivery. Without a URL, alerts are logged and dropped.
    #[serde(default)]
    pub alerts: AlertConfig,

    /// Venues to poll, in fetch order.
    #[serde(default)]
    pub venues: Vec<VenueConfig>,

    /// Explicit cross-venue ticker aliases.
    #[serde(default)]
    pub pairs: Vec<PairConfig>,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the TOML content is
    /// malformed, or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Venues with `enabled = true`, in configured order.
    pub fn enabled_venues(&self) -> impl Iterator<Item = &VenueConfig> {
        self.venues.iter().filter(|venue| venue.enabled)
    }

    /// Pair aliases as domain values.
    #[must_use]
    pub fn aliases(&self) -> Vec<MarketAlias> {
        self.pairs.iter().map(PairConfig::alias).collect()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.poll.interval_secs == 0 {
            return Err(invalid("interval_secs", "must be greater than 0"));
        }
        if self.poll.max_concurrent_fetches == 0 {
            return Err(invalid("max_concurrent_fetches", "must be greater than 0"));
        }

        self.validate_alerts()?;
        self.validate_venues()?;
        self.validate_pairs()?;
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_alerts(&self) -> Result<()> {
        let alerts = &self.alerts;
        if alerts.max_attempts == 0 {
            return Err(invalid("max_attempts", "must be greater than 0"));
        }
        if alerts.initial_backoff_ms == 0 {
            return Err(invalid("initial_backoff_ms", "must be greater than 0"));
        }
        if alerts.max_backoff_ms < alerts.initial_backoff_ms {
            return Err(invalid("max_backoff_ms", "must be >= initial_backoff_ms"));
        }
        if alerts.timeout_ms == 0 {
            return Err(invalid("timeout_ms", "must be greater than 0"));
        }
        if alerts.suppression_window_secs == 0 {
            return Err(invalid("suppression_window_secs", "must be greater than 0"));
        }
        if alerts.max_records == 0 {
            return Err(invalid("max_records", "must be greater than 0"));
        }
        if alerts.accepted_statuses.is_empty() {
            return Err(invalid("accepted_statuses", "must not be empty"));
        }
        if let Some(status) = alerts
            .accepted_statuses
            .iter()
            .find(|status| !(100..=599).contains(*status))
        {
            return Err(invalid("accepted_statuses", format!("{status} is not an HTTP status")));
        }
        if let Some(url) = &alerts.webhook_url {
            if !url.trim().is_empty() {
                Url::parse(url.trim()).map_err(|err| invalid("webhook_url", err.to_string()))?;
            }
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_venues(&self) -> Result<()> {
        if self.enabled_venues().next().is_none() {
            return Err(ConfigError::MissingField { field: "venues" }.into());
        }

        let mut names = HashSet::new();
        for venue in &self.venues {
            if venue.name.trim().is_empty() {
                return Err(ConfigError::MissingField { field: "venues.name" }.into());
            }
            if !names.insert(venue.name.as_str()) {
                return Err(invalid("venues.name", format!("duplicate venue name {}", venue.name)));
            }
            if !venue.enabled {
                continue;
            }
            if venue.base_urls.as_ref().is_some_and(Vec::is_empty) {
                return Err(invalid("base_urls", format!("{}: must not be empty", venue.name)));
            }
            for base in venue.effective_base_urls() {
                Url::parse(&base).map_err(|err| invalid("base_urls", format!("{}: {base}: {err}", venue.name)))?;
            }
            if venue.markets_paths.is_empty() {
                return Err(invalid("markets_paths", format!("{}: must not be empty", venue.name)));
            }
            if venue.markets_limit == 0 {
                return Err(invalid("markets_limit", format!("{}: must be greater than 0", venue.name)));
            }
            if venue.timeout_ms == 0 || venue.connect_timeout_ms == 0 {
                return Err(invalid("timeout_ms", format!("{}: must be greater than 0", venue.name)));
            }
            if let Some(auth) = &venue.auth {
                if auth.key_id.is_none() && auth.key_id_env.is_none() {
                    return Err(ConfigError::MissingField {
                        field: "venues.auth.key_id",
                    }
                    .into());
                }
                if auth.key_source().is_empty() {
                    return Err(ConfigError::MissingField {
                        field: "venues.auth.private_key",
                    }
                    .into());
                }
            }
        }
        Ok(())
    }

    #[allow(clippy::result_large_err)]
    fn validate_pairs(&self) -> Result<()> {
        let venues: HashSet<&str> = self.venues.iter().map(|venue| venue.name.as_str()).collect();
        let mut keys = HashSet::new();
        for pair in &self.pairs {
            let key = pair.key.trim();
            if key.is_empty() {
                return Err(ConfigError::MissingField { field: "pairs.key" }.into());
            }
            if !keys.insert(key) {
                return Err(invalid("pairs.key", format!("duplicate pair key {key}")));
            }
            if let Some(unknown) = pair.tickers.keys().find(|name| !venues.contains(name.as_str())) {
                return Err(invalid("pairs.tickers", format!("{key}: unknown venue {unknown}")));
            }
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> crate::error::Error {
    ConfigError::InvalidValue {
        field,
        reason: reason.into(),
    }
    .into()
}
