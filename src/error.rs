use thiserror::Error;

use crate::domain::VenueId;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Request authentication errors.
///
/// Both variants are fatal to the request being signed, never to the process.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("invalid private key: {reason}")]
    KeyFormat { reason: String },

    #[error("failed to sign request: {0}")]
    Signing(String),
}

/// One failed endpoint candidate.
#[derive(Debug, Clone)]
pub struct CandidateFailure {
    pub url: String,
    pub error: String,
}

/// Every candidate for a resource failed its probe.
#[derive(Error, Debug, Clone)]
#[error("no endpoint available for {resource} ({} candidates failed)", .failures.len())]
pub struct NoEndpointAvailable {
    pub resource: String,
    pub failures: Vec<CandidateFailure>,
}

/// Per-venue market data errors. The venue is skipped for the cycle.
#[derive(Error, Debug)]
pub enum VenueError {
    #[error("fetch from {venue} failed: {cause}")]
    Fetch { venue: VenueId, cause: String },

    #[error("unexpected response shape from {venue}: {reason}")]
    Schema { venue: VenueId, reason: String },

    #[error(transparent)]
    NoEndpoint(#[from] NoEndpointAvailable),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Venue(#[from] VenueError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
