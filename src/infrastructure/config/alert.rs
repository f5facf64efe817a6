//! Alert delivery configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::alert::{DispatcherSettings, RetryPolicy};

/// `[alerts]`: webhook target, suppression and retry.
#[derive(Debug, Clone, Deserialize)]
pub struct AlertConfig {
    /// Webhook URL. Prefer `webhook_url_env` to keep the token out of files.
    #[serde(default)]
    pub webhook_url: Option<String>,
    /// Environment variable holding the webhook URL.
    #[serde(default = "default_webhook_url_env")]
    pub webhook_url_env: Option<String>,
    #[serde(default = "default_suppression_window_secs")]
    pub suppression_window_secs: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Attempts per alert, including the first.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,
    /// HTTP statuses counted as delivered.
    #[serde(default = "default_accepted_statuses")]
    pub accepted_statuses: Vec<u16>,
    /// Dedup records kept before the oldest is evicted.
    #[serde(default = "default_max_records")]
    pub max_records: usize,
    #[serde(default)]
    pub username: Option<String>,
    /// Send a one-off notice when the poll loop starts.
    #[serde(default)]
    pub online_message: bool,
}

fn default_webhook_url_env() -> Option<String> {
    Some("SPREADWATCH_WEBHOOK_URL".into())
}

const fn default_suppression_window_secs() -> u64 {
    300
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_initial_backoff_ms() -> u64 {
    500
}

const fn default_max_backoff_ms() -> u64 {
    8_000
}

fn default_accepted_statuses() -> Vec<u16> {
    vec![200, 204]
}

const fn default_max_records() -> usize {
    10_000
}

impl AlertConfig {
    /// Effective webhook URL: the inline value, else the environment variable.
    ///
    /// Blank values count as unset.
    #[must_use]
    pub fn webhook_url<F>(&self, lookup: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.webhook_url
            .clone()
            .or_else(|| self.webhook_url_env.as_deref().and_then(lookup))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_backoff: Duration::from_millis(self.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            ..RetryPolicy::default()
        }
    }

    #[must_use]
    pub fn dispatcher_settings(&self) -> DispatcherSettings {
        DispatcherSettings {
            suppression_window: Duration::from_secs(self.suppression_window_secs),
            retry: self.retry_policy(),
            accepted_statuses: self.accepted_statuses.clone(),
            max_records: self.max_records,
            username: self.username.clone(),
        }
    }
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            webhook_url: None,
            webhook_url_env: default_webhook_url_env(),
            suppression_window_secs: default_suppression_window_secs(),
            timeout_ms: default_timeout_ms(),
            max_attempts: default_max_attempts(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            accepted_statuses: default_accepted_statuses(),
            max_records: default_max_records(),
            username: None,
            online_message: false,
        }
    }
}
