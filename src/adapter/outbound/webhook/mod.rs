//! Webhook alert transport.
//!
//! POSTs the JSON payload and reports whatever status came back. Retry and
//! success policy live in the alert dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::Client as HttpClient;
use tracing::{debug, warn};

use crate::port::{AlertPayload, AlertTransport, TransportError, TransportResponse};

/// Delivers alerts to a single webhook URL.
pub struct WebhookTransport {
    http: HttpClient,
    url: String,
}

impl WebhookTransport {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });
        Self {
            http,
            url: url.into(),
        }
    }
}

impl std::fmt::Debug for WebhookTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Webhook URLs embed their secret token.
        f.debug_struct("WebhookTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl AlertTransport for WebhookTransport {
    async fn send(&self, payload: &AlertPayload) -> Result<TransportResponse, TransportError> {
        let response = self
            .http
            .post(&self.url)
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Network(err.without_url().to_string())
                }
            })?;

        let status = response.status().as_u16();
        let retry_after = retry_after(response.headers(), Utc::now());
        debug!(status, ?retry_after, "Webhook responded");
        Ok(TransportResponse { status, retry_after })
    }

    fn name(&self) -> &'static str {
        "webhook"
    }
}

/// Parse `Retry-After` as delay-seconds or an HTTP date.
///
/// Delays too large for a `Duration` saturate; the dispatcher caps them.
fn retry_after(headers: &HeaderMap, now: DateTime<Utc>) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?.trim();
    if let Ok(seconds) = value.parse::<f64>() {
        if !(seconds.is_finite() && seconds >= 0.0) {
            return None;
        }
        return Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    (at - now).to_std().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use reqwest::header::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(RETRY_AFTER, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn retry_after_seconds() {
        assert_eq!(retry_after(&headers("3"), Utc::now()), Some(Duration::from_secs(3)));
        assert_eq!(retry_after(&headers("1.5"), Utc::now()), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn retry_after_beyond_duration_range_saturates() {
        assert_eq!(
            retry_after(&headers("100000000000000000000"), Utc::now()),
            Some(Duration::MAX)
        );
        assert_eq!(retry_after(&headers("inf"), Utc::now()), None);
        assert_eq!(retry_after(&headers("NaN"), Utc::now()), None);
    }

    #[test]
    fn retry_after_http_date() {
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(
            retry_after(&headers("Wed, 01 Jan 2025 00:00:10 GMT"), now),
            Some(Duration::from_secs(10))
        );
    }

    #[test]
    fn retry_after_garbage_or_missing() {
        assert_eq!(retry_after(&headers("soon"), Utc::now()), None);
        assert_eq!(retry_after(&headers("-1"), Utc::now()), None);
        assert_eq!(retry_after(&HeaderMap::new(), Utc::now()), None);
    }

    #[test]
    fn debug_hides_url() {
        let transport = WebhookTransport::new("https://hooks.example/secret-token", Duration::from_secs(1));
        assert!(!format!("{transport:?}").contains("secret-token"));
    }
}
