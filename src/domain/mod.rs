//! Venue-agnostic domain logic: quotes, tiers, pairing and classification.

pub mod classifier;
pub mod endpoint;
pub mod id;
pub mod matching;
pub mod money;
pub mod opportunity;
pub mod quote;
pub mod tier;

pub use classifier::{Classification, NoOpportunity, SpreadClassifier};
pub use endpoint::EndpointCandidate;
pub use id::{MarketKey, VenueId};
pub use matching::{MarketAlias, PairMatcher, QuotePair};
pub use money::Price;
pub use opportunity::{Fingerprint, Opportunity};
pub use quote::Quote;
pub use tier::SpreadTier;
