//! Generic venue HTTP client.
//!
//! One client per configured venue. Endpoint choice is delegated to the
//! [`EndpointResolver`]; authenticated venues sign every request, including
//! probes. Response bodies are normalized by the venue kind's module.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client as HttpClient, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;

use super::settings::{VenueConfig, VenueKind};
use crate::adapter::outbound::auth::RequestSigner;
use crate::adapter::outbound::endpoint::EndpointResolver;
use crate::adapter::outbound::kalshi::dto::KalshiMarketsResponse;
use crate::adapter::outbound::polymarket::dto::response::GammaMarket;
use crate::adapter::outbound::{kalshi, limitless, polymarket};
use crate::domain::{EndpointCandidate, Quote, VenueId};
use crate::error::{AuthError, NoEndpointAvailable, VenueError};
use crate::port::{EndpointProbe, QuoteSource};

/// Logical resource name of the markets listing.
pub const MARKETS_RESOURCE: &str = "markets";

/// Whether requests to a venue are signed.
#[derive(Clone)]
pub enum Access {
    Public,
    Authenticated(Arc<RequestSigner>),
}

#[derive(Error, Debug)]
enum RequestFailure {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP {0}")]
    Status(StatusCode),
}

/// HTTP client for one venue's market listing.
pub struct VenueClient {
    venue: VenueId,
    kind: VenueKind,
    http: HttpClient,
    access: Access,
    resolver: EndpointResolver,
    markets_limit: usize,
}

impl VenueClient {
    #[must_use]
    pub fn from_config(config: &VenueConfig, access: Access) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Self {
            venue: config.venue_id(),
            kind: config.kind,
            http,
            access,
            resolver: EndpointResolver::new()
                .with_resource(MARKETS_RESOURCE, config.markets_candidates()),
            markets_limit: config.markets_limit.max(1),
        }
    }

    #[must_use]
    pub fn kind(&self) -> VenueKind {
        self.kind
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self.access, Access::Authenticated(_))
    }

    #[must_use]
    pub fn resolver(&self) -> &EndpointResolver {
        &self.resolver
    }

    /// Resolve (and pin) the markets endpoint without fetching quotes.
    pub async fn resolve_markets(&self) -> Result<EndpointCandidate, NoEndpointAvailable> {
        self.resolver.resolve(MARKETS_RESOURCE, self).await
    }

    fn markets_url(&self, candidate: &EndpointCandidate, limit: usize) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&candidate.url())?;
        {
            let mut query = url.query_pairs_mut();
            for (name, value) in self.kind.markets_query() {
                query.append_pair(name, value);
            }
            query.append_pair("limit", &limit.to_string());
        }
        Ok(url)
    }

    async fn get(&self, url: &Url) -> Result<reqwest::Response, RequestFailure> {
        let mut request = self.http.get(url.clone());
        if let Access::Authenticated(signer) = &self.access {
            let signed = signer.sign_now("GET", url.path())?;
            for (name, value) in signer.header_pairs(&signed) {
                request = request.header(name, value);
            }
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RequestFailure::Status(status));
        }
        Ok(response)
    }

    fn fetch_failed(&self, cause: impl ToString) -> VenueError {
        self.resolver.invalidate(MARKETS_RESOURCE);
        VenueError::Fetch {
            venue: self.venue.clone(),
            cause: cause.to_string(),
        }
    }

    fn normalize(&self, body: &str) -> Result<Vec<Quote>, VenueError> {
        let observed_at = Utc::now();
        let schema = |err: serde_json::Error| VenueError::Schema {
            venue: self.venue.clone(),
            reason: err.to_string(),
        };

        Ok(match self.kind {
            VenueKind::Kalshi => {
                let response: KalshiMarketsResponse = serde_json::from_str(body).map_err(schema)?;
                kalshi::normalize(&self.venue, response, observed_at)
            }
            VenueKind::Polymarket => {
                let markets: Vec<GammaMarket> = serde_json::from_str(body).map_err(schema)?;
                polymarket::normalize(&self.venue, markets, observed_at)
            }
            VenueKind::Limitless => {
                let body: Value = serde_json::from_str(body).map_err(schema)?;
                let markets = limitless::dto::market_list(body).ok_or_else(|| VenueError::Schema {
                    venue: self.venue.clone(),
                    reason: "no market list in response".into(),
                })?;
                limitless::normalize(&self.venue, markets, observed_at)
            }
        })
    }
}

#[async_trait]
impl EndpointProbe for VenueClient {
    async fn probe(&self, candidate: &EndpointCandidate) -> Result<(), String> {
        let url = self.markets_url(candidate, 1).map_err(|err| err.to_string())?;
        self.get(&url).await.map(|_| ()).map_err(|err| err.to_string())
    }
}

#[async_trait]
impl QuoteSource for VenueClient {
    fn venue(&self) -> &VenueId {
        &self.venue
    }

    async fn fetch_quotes(&self) -> Result<Vec<Quote>, VenueError> {
        let candidate = self.resolve_markets().await?;
        let url = self
            .markets_url(&candidate, self.markets_limit)
            .map_err(|err| self.fetch_failed(err))?;

        let response = match self.get(&url).await {
            Ok(response) => response,
            Err(RequestFailure::Auth(err)) => return Err(err.into()),
            Err(err) => return Err(self.fetch_failed(err)),
        };
        let body = response.text().await.map_err(|err| self.fetch_failed(err))?;
        let quotes = self.normalize(&body)?;

        let priced = quotes
            .iter()
            .filter(|q| q.comparable_yes_price().is_some())
            .count();
        info!(
            venue = %self.venue,
            endpoint = %candidate,
            quotes = quotes.len(),
            priced,
            "Fetched quotes"
        );
        debug!(venue = %self.venue, bytes = body.len(), "Markets payload size");
        Ok(quotes)
    }
}
