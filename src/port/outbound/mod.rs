//! Outbound ports (driven side): interfaces implemented by outbound adapters.

pub mod exchange;
pub mod notifier;
