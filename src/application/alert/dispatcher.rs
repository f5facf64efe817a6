//! Alert dispatch with dedup and bounded retry.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use super::dedup::{DedupStore, Refusal};
use super::message;
use super::policy::RetryPolicy;
use crate::domain::Opportunity;
use crate::port::{AlertPayload, AlertTransport};

const TOO_MANY_REQUESTS: u16 = 429;

/// Dispatcher tuning.
#[derive(Debug, Clone)]
pub struct DispatcherSettings {
    pub suppression_window: Duration,
    pub retry: RetryPolicy,
    pub accepted_statuses: Vec<u16>,
    pub max_records: usize,
    pub username: Option<String>,
}

impl Default for DispatcherSettings {
    fn default() -> Self {
        Self {
            suppression_window: Duration::from_secs(300),
            retry: RetryPolicy::default(),
            accepted_statuses: vec![200, 204],
            max_records: 10_000,
            username: None,
        }
    }
}

/// Result of one dispatch. None of these are errors to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    Delivered { attempts: u32 },
    /// Same fingerprint delivered within the window, or being delivered now.
    Suppressed,
    /// No transport configured.
    Unconfigured,
    DeliveryFailed { attempts: u32, last_error: String },
}

/// Serializes opportunities into notifications and delivers them.
///
/// One per process, shared by `Arc`. The dedup lock is never held across
/// an await.
pub struct AlertDispatcher {
    transport: Option<Arc<dyn AlertTransport>>,
    settings: DispatcherSettings,
    dedup: Mutex<DedupStore>,
}

impl AlertDispatcher {
    #[must_use]
    pub fn new(transport: Option<Arc<dyn AlertTransport>>, settings: DispatcherSettings) -> Self {
        let dedup = DedupStore::new(settings.suppression_window, settings.max_records);
        Self {
            transport,
            settings,
            dedup: Mutex::new(dedup),
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    /// Number of dedup records currently held.
    #[must_use]
    pub fn tracked_alerts(&self) -> usize {
        self.dedup.lock().len()
    }

    /// Dispatch an opportunity unless it was recently delivered.
    pub async fn dispatch(&self, opportunity: &Opportunity) -> DispatchOutcome {
        let Some(transport) = self.transport.as_ref() else {
            debug!(key = %opportunity.key(), "No alert transport configured");
            return DispatchOutcome::Unconfigured;
        };

        let fingerprint = opportunity.fingerprint();
        let reserved = self.dedup.lock().try_reserve(&fingerprint, Instant::now());
        if let Err(refusal) = reserved {
            match refusal {
                Refusal::RecentlySent(at) => debug!(
                    fingerprint = %fingerprint,
                    sent_secs_ago = at.elapsed().as_secs(),
                    "Alert suppressed"
                ),
                Refusal::InFlight => debug!(fingerprint = %fingerprint, "Alert already in flight"),
            }
            return DispatchOutcome::Suppressed;
        }

        let payload = message::opportunity_payload(opportunity, self.settings.username.as_deref());
        let outcome = self.deliver(transport.as_ref(), &payload).await;

        match &outcome {
            DispatchOutcome::Delivered { attempts } => {
                self.dedup.lock().confirm(&fingerprint, Instant::now());
                info!(
                    fingerprint = %fingerprint,
                    tier = %opportunity.tier(),
                    spread_pct = %opportunity.spread_pct(),
                    attempts,
                    "Alert delivered"
                );
            }
            DispatchOutcome::DeliveryFailed { attempts, last_error } => {
                self.dedup.lock().release(&fingerprint);
                warn!(
                    fingerprint = %fingerprint,
                    attempts,
                    error = %last_error,
                    "Alert delivery failed"
                );
            }
            DispatchOutcome::Suppressed | DispatchOutcome::Unconfigured => {}
        }
        outcome
    }

    /// Send the startup notice. Not deduplicated.
    pub async fn announce_online(&self, venues: &[String]) -> DispatchOutcome {
        let Some(transport) = self.transport.as_ref() else {
            return DispatchOutcome::Unconfigured;
        };
        let payload = message::online_payload(venues, self.settings.username.as_deref());
        let outcome = self.deliver(transport.as_ref(), &payload).await;
        if let DispatchOutcome::DeliveryFailed { last_error, .. } = &outcome {
            warn!(error = %last_error, "Online notice failed");
        }
        outcome
    }

    async fn deliver(&self, transport: &dyn AlertTransport, payload: &AlertPayload) -> DispatchOutcome {
        let policy = &self.settings.retry;
        let max_attempts = policy.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;
            let (error, retry_after, retryable) = match transport.send(payload).await {
                Ok(response) if self.settings.accepted_statuses.contains(&response.status) => {
                    return DispatchOutcome::Delivered { attempts: attempt };
                }
                Ok(response) => {
                    let throttled = response.status == TOO_MANY_REQUESTS;
                    (
                        format!("HTTP {}", response.status),
                        response.retry_after.filter(|_| throttled),
                        throttled || response.status >= 500,
                    )
                }
                Err(err) => (err.to_string(), None, true),
            };

            if !retryable || attempt >= max_attempts {
                return DispatchOutcome::DeliveryFailed {
                    attempts: attempt,
                    last_error: error,
                };
            }

            let delay = policy.delay(attempt, retry_after);
            warn!(
                transport = transport.name(),
                attempt,
                max_attempts,
                error = %error,
                delay_ms = delay.as_millis() as u64,
                "Alert delivery failed, retrying"
            );
            sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MarketKey, Quote, SpreadTier, VenueId};
    use crate::port::{TransportError, TransportResponse};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::collections::VecDeque;

    /// Transport that replays scripted results, then succeeds.
    #[derive(Default)]
    struct ScriptedTransport {
        script: Mutex<VecDeque<Result<TransportResponse, TransportError>>>,
        sent: Mutex<Vec<AlertPayload>>,
    }

    impl ScriptedTransport {
        fn with(script: Vec<Result<TransportResponse, TransportError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
                sent: Mutex::default(),
            })
        }

        fn sent(&self) -> usize {
            self.sent.lock().len()
        }
    }

    #[async_trait]
    impl AlertTransport for ScriptedTransport {
        async fn send(&self, payload: &AlertPayload) -> Result<TransportResponse, TransportError> {
            self.sent.lock().push(payload.clone());
            self.script.lock().pop_front().unwrap_or(Ok(status(204)))
        }

        fn name(&self) -> &'static str {
            "scripted"
        }
    }

    fn status(status: u16) -> TransportResponse {
        TransportResponse {
            status,
            retry_after: None,
        }
    }

    fn opportunity(key: &str, tier: SpreadTier) -> Opportunity {
        let now = Utc::now();
        let a = Quote::new(VenueId::from("a"), "A", "Title", Some(dec!(0.40)), None, now);
        let b = Quote::new(VenueId::from("b"), "B", "Title", Some(dec!(0.41)), None, now);
        Opportunity::new(MarketKey::from(key), tier, dec!(1), a, b, now)
    }

    fn dispatcher(transport: Arc<ScriptedTransport>) -> AlertDispatcher {
        AlertDispatcher::new(Some(transport), DispatcherSettings::default())
    }

    #[tokio::test(start_paused = true)]
    async fn second_dispatch_inside_window_is_suppressed() {
        let transport = ScriptedTransport::with(vec![]);
        let dispatcher = dispatcher(transport.clone());
        let opp = opportunity("k", SpreadTier::Good);

        assert_eq!(dispatcher.dispatch(&opp).await, DispatchOutcome::Delivered { attempts: 1 });
        assert_eq!(dispatcher.dispatch(&opp).await, DispatchOutcome::Suppressed);
        assert_eq!(transport.sent(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn window_expiry_allows_redelivery() {
        let transport = ScriptedTransport::with(vec![]);
        let dispatcher = dispatcher(transport.clone());
        let opp = opportunity("k", SpreadTier::Good);

        dispatcher.dispatch(&opp).await;
        tokio::time::advance(Duration::from_secs(301)).await;
        assert_eq!(dispatcher.dispatch(&opp).await, DispatchOutcome::Delivered { attempts: 1 });
        assert_eq!(transport.sent(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tier_change_is_not_suppressed() {
        let transport = ScriptedTransport::with(vec![]);
        let dispatcher = dispatcher(transport.clone());

        dispatcher.dispatch(&opportunity("k", SpreadTier::Good)).await;
        let outcome = dispatcher.dispatch(&opportunity("k", SpreadTier::Exceptional)).await;
        assert_eq!(outcome, DispatchOutcome::Delivered { attempts: 1 });
    }

    #[tokio::test]
    async fn missing_transport_is_unconfigured() {
        let dispatcher = AlertDispatcher::new(None, DispatcherSettings::default());
        let outcome = dispatcher.dispatch(&opportunity("k", SpreadTier::Good)).await;
        assert_eq!(outcome, DispatchOutcome::Unconfigured);
        assert_eq!(dispatcher.tracked_alerts(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried() {
        let transport = ScriptedTransport::with(vec![
            Err(TransportError::Timeout),
            Ok(status(502)),
            Ok(status(204)),
        ]);
        let dispatcher = dispatcher(transport.clone());

        let outcome = dispatcher.dispatch(&opportunity("k", SpreadTier::Good)).await;
        assert_eq!(outcome, DispatchOutcome::Delivered { attempts: 3 });
        assert_eq!(transport.sent(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_reports_failure_and_releases_fingerprint() {
        let transport = ScriptedTransport::with(vec![
            Err(TransportError::Network("refused".into())),
            Err(TransportError::Network("refused".into())),
            Err(TransportError::Network("refused".into())),
        ]);
        let dispatcher = dispatcher(transport.clone());
        let opp = opportunity("k", SpreadTier::Good);

        let outcome = dispatcher.dispatch(&opp).await;
        assert_eq!(
            outcome,
            DispatchOutcome::DeliveryFailed {
                attempts: 3,
                last_error: "transport failure: refused".into()
            }
        );
        assert_eq!(dispatcher.dispatch(&opp).await, DispatchOutcome::Delivered { attempts: 1 });
    }

    #[tokio::test(start_paused = true)]
    async fn client_errors_are_not_retried() {
        let transport = ScriptedTransport::with(vec![Ok(status(400))]);
        let dispatcher = dispatcher(transport.clone());

        let outcome = dispatcher.dispatch(&opportunity("k", SpreadTier::Good)).await;
        assert!(matches!(outcome, DispatchOutcome::DeliveryFailed { attempts: 1, .. }));
        assert_eq!(transport.sent(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_waits_for_retry_after() {
        let transport = ScriptedTransport::with(vec![Ok(TransportResponse {
            status: 429,
            retry_after: Some(Duration::from_secs(5)),
        })]);
        let dispatcher = dispatcher(transport.clone());

        let started = Instant::now();
        let outcome = dispatcher.dispatch(&opportunity("k", SpreadTier::Good)).await;
        assert_eq!(outcome, DispatchOutcome::Delivered { attempts: 2 });
        assert!(started.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn online_notice_is_not_deduplicated() {
        let transport = ScriptedTransport::with(vec![]);
        let dispatcher = dispatcher(transport.clone());
        let venues = vec!["kalshi".to_string()];

        dispatcher.announce_online(&venues).await;
        dispatcher.announce_online(&venues).await;
        assert_eq!(transport.sent(), 2);
    }
}
