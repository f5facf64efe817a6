//! Process-level plumbing: configuration, wiring and the poll loop.
//!
//! - [`bootstrap`] - builds venue clients, the dispatcher and the poll cycle
//!   from a validated [`config::settings::Config`]
//! - [`config`] - TOML sections, defaults and validation
//! - [`orchestration`] - the interval-driven [`orchestration::PollLoop`]

pub mod bootstrap;
pub mod config;
pub mod orchestration;
