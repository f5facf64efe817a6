//! Spreadwatch - cross-venue prediction market spread monitoring.
//!
//! Polls prediction-market venues for live quotes, signs requests for venues
//! that require it, pairs markets across venues, classifies the price spread
//! into severity tiers and dispatches deduplicated webhook alerts.
//!
//! # Architecture
//!
//! Hexagonal layout:
//!
//! - [`domain`] - Quotes, tiers, opportunities, pairing and classification
//! - [`port`] - Traits for quote sources, endpoint probes and alert transports
//! - [`adapter`] - Venue HTTP clients, request signing, endpoint resolution,
//!   webhook delivery and the CLI
//! - [`application`] - Alert dispatch and the poll cycle
//! - [`infrastructure`] - Configuration, wiring and the poll loop runtime
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use spreadwatch::domain::SpreadTier;
//!
//! assert_eq!(SpreadTier::for_spread(dec!(1.0)), SpreadTier::Good);
//! assert_eq!(SpreadTier::for_spread(dec!(0.99)), SpreadTier::Fair);
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
