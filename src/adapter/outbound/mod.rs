//! Outbound adapters (driven side).

pub mod auth;
pub mod endpoint;
pub mod kalshi;
pub mod limitless;
pub mod polymarket;
pub mod venue;
pub mod webhook;
