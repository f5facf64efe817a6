//! Alert dispatch: payload rendering, dedup and delivery retry.

mod dedup;
mod dispatcher;
pub mod message;
mod policy;

pub use dedup::{DedupStore, Refusal};
pub use dispatcher::{AlertDispatcher, DispatchOutcome, DispatcherSettings};
pub use policy::{RetryPolicy, MAX_RETRY_AFTER};
