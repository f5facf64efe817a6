//! Observable poll loop state.

use std::fmt;

/// Where the poll loop currently is.
///
/// `Idle -> Fetching -> Classifying -> Dispatching -> Idle`, with `Stopped`
/// reachable from any state once shutdown is requested.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PollState {
    #[default]
    Idle,
    Fetching,
    Classifying,
    Dispatching,
    Stopped,
}

impl PollState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Fetching => "fetching",
            Self::Classifying => "classifying",
            Self::Dispatching => "dispatching",
            Self::Stopped => "stopped",
        }
    }
}

impl fmt::Display for PollState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
