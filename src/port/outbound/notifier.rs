//! Notifier port for alert delivery.
//!
//! The transport only moves bytes. Deciding which statuses count as success,
//! when to retry and what to suppress belongs to the alert dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

/// Webhook message body: `content`, optional `username` and rich embeds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPayload {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub embeds: Vec<Embed>,
}

/// A rich embed block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub color: u32,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    pub fields: Vec<EmbedField>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// What the remote end answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    /// Parsed `Retry-After` header, if any.
    pub retry_after: Option<Duration>,
}

/// The request never produced a response.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("transport failure: {0}")]
    Network(String),
}

/// Delivers serialized alerts to an external channel.
#[async_trait]
pub trait AlertTransport: Send + Sync {
    async fn send(&self, payload: &AlertPayload) -> Result<TransportResponse, TransportError>;

    /// Transport name for logging.
    fn name(&self) -> &'static str;
}
