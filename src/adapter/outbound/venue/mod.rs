//! Market data fetching across venues.

pub mod client;
pub mod number;
pub mod settings;

pub use client::{Access, VenueClient, MARKETS_RESOURCE};
pub use settings::{AuthConfig, VenueConfig, VenueKind};
