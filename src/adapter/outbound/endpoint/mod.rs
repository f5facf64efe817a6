//! Endpoint resolution for unstable, multi-candidate API surfaces.

mod resolver;

pub use resolver::{probe_all, EndpointResolver};
