//! Periodic fetch, classify and dispatch.

mod cycle;
mod report;
mod state;

pub use cycle::PollCycle;
pub use report::CycleReport;
pub use state::PollState;
