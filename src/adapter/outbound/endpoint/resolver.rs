//! Ordered endpoint probing with a pin cache.
//!
//! Candidates for a resource are probed in configuration order. The first
//! one that answers is pinned and reused until a caller reports it broken,
//! at which point the next resolution starts again from the top of the
//! list. Nothing is ever blacklisted.

use std::collections::HashMap;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use crate::domain::EndpointCandidate;
use crate::error::{CandidateFailure, NoEndpointAvailable};
use crate::port::EndpointProbe;

/// Resolves logical resources to a working endpoint candidate.
#[derive(Debug, Default)]
pub struct EndpointResolver {
    candidates: HashMap<String, Vec<EndpointCandidate>>,
    pins: Mutex<HashMap<String, EndpointCandidate>>,
}

impl EndpointResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the ordered candidate list for a resource.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Into<String>, candidates: Vec<EndpointCandidate>) -> Self {
        self.candidates.insert(resource.into(), candidates);
        self
    }

    /// Candidates registered for a resource, in probe order.
    #[must_use]
    pub fn candidates(&self, resource: &str) -> &[EndpointCandidate] {
        self.candidates
            .get(resource)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Currently pinned candidate for a resource, if any.
    #[must_use]
    pub fn pinned(&self, resource: &str) -> Option<EndpointCandidate> {
        self.pins.lock().get(resource).cloned()
    }

    /// Return the pinned candidate, probing the list if nothing is pinned.
    pub async fn resolve(
        &self,
        resource: &str,
        probe: &dyn EndpointProbe,
    ) -> Result<EndpointCandidate, NoEndpointAvailable> {
        if let Some(pinned) = self.pinned(resource) {
            return Ok(pinned);
        }

        let chosen = probe_all(resource, self.candidates(resource), probe).await?;
        info!(resource, endpoint = %chosen, "Pinned endpoint");
        self.pins.lock().insert(resource.to_string(), chosen.clone());
        Ok(chosen)
    }

    /// Forget the pin for a resource after it failed.
    pub fn invalidate(&self, resource: &str) {
        if let Some(previous) = self.pins.lock().remove(resource) {
            warn!(resource, endpoint = %previous, "Cleared endpoint pin after failure");
        }
    }
}

/// Probe candidates in order and return the first that answers.
///
/// Later candidates are never touched once one succeeds.
pub async fn probe_all(
    resource: &str,
    candidates: &[EndpointCandidate],
    probe: &dyn EndpointProbe,
) -> Result<EndpointCandidate, NoEndpointAvailable> {
    let mut failures = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        match probe.probe(candidate).await {
            Ok(()) => {
                debug!(resource, endpoint = %candidate, "Endpoint probe succeeded");
                return Ok(candidate.clone());
            }
            Err(error) => {
                debug!(resource, endpoint = %candidate, error = %error, "Endpoint probe failed");
                failures.push(CandidateFailure {
                    url: candidate.url(),
                    error,
                });
            }
        }
    }

    Err(NoEndpointAvailable {
        resource: resource.to_string(),
        failures,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;

    /// Probe that fails for a configurable set of base URLs and records calls.
    #[derive(Default)]
    struct ScriptedProbe {
        failing: Mutex<HashSet<String>>,
        calls: Mutex<Vec<String>>,
    }

    impl ScriptedProbe {
        fn failing(bases: &[&str]) -> Self {
            let probe = Self::default();
            probe.failing.lock().extend(bases.iter().map(|b| b.to_string()));
            probe
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().clone()
        }
    }

    #[async_trait]
    impl EndpointProbe for ScriptedProbe {
        async fn probe(&self, candidate: &EndpointCandidate) -> Result<(), String> {
            self.calls.lock().push(candidate.base_url().to_string());
            if self.failing.lock().contains(candidate.base_url()) {
                Err("HTTP 404".into())
            } else {
                Ok(())
            }
        }
    }

    fn resolver() -> EndpointResolver {
        EndpointResolver::new().with_resource(
            "markets",
            vec![
                EndpointCandidate::new("https://a", "/markets"),
                EndpointCandidate::new("https://b", "/markets"),
                EndpointCandidate::new("https://c", "/markets"),
            ],
        )
    }

    #[tokio::test]
    async fn first_success_wins_and_later_candidates_are_untouched() {
        let probe = ScriptedProbe::failing(&["https://a"]);
        let chosen = resolver().resolve("markets", &probe).await.unwrap();
        assert_eq!(chosen.base_url(), "https://b");
        assert_eq!(probe.calls(), vec!["https://a", "https://b"]);
    }

    #[tokio::test]
    async fn pinned_candidate_is_reused_without_probing() {
        let probe = ScriptedProbe::failing(&["https://a"]);
        let resolver = resolver();
        resolver.resolve("markets", &probe).await.unwrap();
        resolver.resolve("markets", &probe).await.unwrap();
        assert_eq!(probe.calls().len(), 2);
        assert_eq!(resolver.pinned("markets").unwrap().base_url(), "https://b");
    }

    #[tokio::test]
    async fn invalidation_restarts_from_the_top() {
        let probe = ScriptedProbe::failing(&["https://a"]);
        let resolver = resolver();
        resolver.resolve("markets", &probe).await.unwrap();

        probe.failing.lock().clear();
        resolver.invalidate("markets");
        assert!(resolver.pinned("markets").is_none());

        let chosen = resolver.resolve("markets", &probe).await.unwrap();
        assert_eq!(chosen.base_url(), "https://a");
    }

    #[tokio::test]
    async fn all_failing_reports_every_candidate() {
        let probe = ScriptedProbe::failing(&["https://a", "https://b", "https://c"]);
        let err = resolver().resolve("markets", &probe).await.unwrap_err();
        assert_eq!(err.resource, "markets");
        assert_eq!(err.failures.len(), 3);
        assert_eq!(err.failures[2].url, "https://c/markets");
        assert_eq!(err.failures[2].error, "HTTP 404");
    }

    #[tokio::test]
    async fn unknown_resource_has_no_endpoint() {
        let probe = ScriptedProbe::default();
        let err = resolver().resolve("events", &probe).await.unwrap_err();
        assert!(err.failures.is_empty());
        assert!(probe.calls().is_empty());
    }
}
