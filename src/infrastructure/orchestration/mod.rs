//! Runtime orchestration.
//!
//! Wires configuration into a running poll loop and owns its lifecycle.

mod runtime;

pub use runtime::PollLoop;
