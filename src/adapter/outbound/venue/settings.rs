//! Venue configuration.

use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

use crate::adapter::outbound::auth::{Credential, HeaderNames, KeySource, SignatureScheme};
use crate::adapter::outbound::{kalshi, limitless, polymarket};
use crate::domain::{EndpointCandidate, VenueId};
use crate::error::AuthError;

/// Supported venue APIs. Selects the request shape and response normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VenueKind {
    Kalshi,
    Polymarket,
    Limitless,
}

impl VenueKind {
    /// Base URLs used when a venue does not configure its own.
    #[must_use]
    pub fn default_base_urls(self) -> Vec<String> {
        match self {
            Self::Kalshi => kalshi::DEFAULT_BASE_URLS.iter().map(ToString::to_string).collect(),
            Self::Polymarket => polymarket::DEFAULT_BASE_URLS.iter().map(ToString::to_string).collect(),
            Self::Limitless => limitless::DEFAULT_BASE_URLS.iter().map(ToString::to_string).collect(),
        }
    }

    /// Header names used when an authenticated venue does not set its own.
    #[must_use]
    pub fn default_header_names(self) -> HeaderNames {
        match self {
            Self::Kalshi => HeaderNames::kalshi(),
            Self::Polymarket | Self::Limitless => HeaderNames::generic(),
        }
    }

    /// Fixed query parameters of the markets listing, before `limit`.
    #[must_use]
    pub fn markets_query(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::Kalshi => &[("status", "open")],
            Self::Polymarket => &[("active", "true"), ("closed", "false")],
            Self::Limitless => &[],
        }
    }
}

impl fmt::Display for VenueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kalshi => write!(f, "kalshi"),
            Self::Polymarket => write!(f, "polymarket"),
            Self::Limitless => write!(f, "limitless"),
        }
    }
}

/// One `[[venues]]` entry.
#[derive(Debug, Clone, Deserialize)]
pub struct VenueConfig {
    /// Unique venue name, used as the venue id.
    pub name: String,
    pub kind: VenueKind,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Ordered base URL candidates. Omitted means the kind's defaults.
    #[serde(default)]
    pub base_urls: Option<Vec<String>>,
    /// Ordered markets path candidates, tried under each base URL.
    #[serde(default = "default_markets_paths")]
    pub markets_paths: Vec<String>,
    /// `limit` sent with the markets listing.
    #[serde(default = "default_markets_limit")]
    pub markets_limit: usize,
    /// Request timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connect timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Present for venues that require signed requests.
    #[serde(default)]
    pub auth: Option<AuthConfig>,
}

const fn default_enabled() -> bool {
    true
}

fn default_markets_paths() -> Vec<String> {
    vec!["/markets".to_string()]
}

const fn default_markets_limit() -> usize {
    100
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

impl VenueConfig {
    /// Minimal config for a venue kind with default endpoints.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: VenueKind) -> Self {
        Self {
            name: name.into(),
            kind,
            enabled: default_enabled(),
            base_urls: None,
            markets_paths: default_markets_paths(),
            markets_limit: default_markets_limit(),
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            auth: None,
        }
    }

    #[must_use]
    pub fn venue_id(&self) -> VenueId {
        VenueId::new(self.name.clone())
    }

    /// Effective base URLs, in probe order.
    #[must_use]
    pub fn effective_base_urls(&self) -> Vec<String> {
        self.base_urls
            .clone()
            .unwrap_or_else(|| self.kind.default_base_urls())
    }

    /// Every base URL crossed with every markets path, base-major.
    #[must_use]
    pub fn markets_candidates(&self) -> Vec<EndpointCandidate> {
        self.effective_base_urls()
            .iter()
            .flat_map(|base| {
                self.markets_paths
                    .iter()
                    .map(move |path| EndpointCandidate::new(base.as_str(), path.as_str()))
            })
            .collect()
    }
}

/// `[venues.auth]`: where the key id and private key come from.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub key_id: Option<String>,
    #[serde(default)]
    pub key_id_env: Option<String>,
    /// Inline PEM, or `env:NAME`.
    #[serde(default)]
    pub private_key: Option<String>,
    #[serde(default)]
    pub private_key_env: Option<String>,
    #[serde(default)]
    pub private_key_path: Option<PathBuf>,
    #[serde(default)]
    pub scheme: SignatureScheme,
    /// Overrides the venue kind's header names.
    #[serde(default)]
    pub headers: Option<HeaderNames>,
}

impl AuthConfig {
    #[must_use]
    pub fn key_source(&self) -> KeySource {
        KeySource {
            inline: self.private_key.clone(),
            env: self.private_key_env.clone(),
            path: self.private_key_path.clone(),
        }
    }

    #[must_use]
    pub fn header_names(&self, kind: VenueKind) -> HeaderNames {
        self.headers
            .clone()
            .unwrap_or_else(|| kind.default_header_names())
    }

    /// Resolve the key id and private key into a validated credential.
    pub fn credential<F>(&self, lookup: F) -> Result<Credential, AuthError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let key_id = match (&self.key_id, &self.key_id_env) {
            (Some(key_id), _) => key_id.trim().to_string(),
            (None, Some(name)) => lookup(name)
                .or_else(|| lookup(&format!("env:{name}")))
                .map(|value| value.trim().trim_matches('"').to_string())
                .ok_or_else(|| AuthError::KeyFormat {
                    reason: format!("environment variable {name} is not set"),
                })?,
            (None, None) => {
                return Err(AuthError::KeyFormat {
                    reason: "no key id configured".into(),
                })
            }
        };
        Credential::resolve(key_id, &self.key_source(), lookup)
    }
}
