//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌─────────┐                                          ┌───────────┐
//! │ Venue   │                                          │  Webhook  │
//! │ Adapter │                                          │  Adapter  │
//! └─────────┘                                          └───────────┘
//! ```
//!
//! - [`QuoteSource`], [`EndpointProbe`] - venue market data
//! - [`AlertTransport`] - outbound alert delivery

pub mod outbound;

pub use outbound::exchange::{EndpointProbe, QuoteSource};
pub use outbound::notifier::{
    AlertPayload, AlertTransport, Embed, EmbedField, TransportError, TransportResponse,
};
