//! Poll loop runtime lifecycle.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::application::alert::DispatchOutcome;
use crate::application::poll::{CycleReport, PollCycle, PollState};

/// Periodic driver of [`PollCycle`].
///
/// Cycles run back to back on a fixed period and never overlap. A cycle that
/// overruns the period is followed immediately by the next one.
pub struct PollLoop {
    cycle: Arc<PollCycle>,
    interval: Duration,
    online_message: bool,
    state: watch::Sender<PollState>,
    last_report: Mutex<Option<CycleReport>>,
}

impl PollLoop {
    #[must_use]
    pub fn new(cycle: Arc<PollCycle>, interval: Duration) -> Self {
        let (state, _) = watch::channel(PollState::Idle);
        Self {
            cycle,
            interval,
            online_message: false,
            state,
            last_report: Mutex::new(None),
        }
    }

    /// Send the startup notice before the first cycle.
    #[must_use]
    pub fn with_online_message(mut self, enabled: bool) -> Self {
        self.online_message = enabled;
        self
    }

    /// Observe state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PollState> {
        self.state.subscribe()
    }

    #[must_use]
    pub fn state(&self) -> PollState {
        *self.state.borrow()
    }

    /// Report of the most recent completed cycle.
    #[must_use]
    pub fn last_report(&self) -> Option<CycleReport> {
        self.last_report.lock().clone()
    }

    /// Run until `shutdown` turns true or its sender is dropped.
    ///
    /// Returns the number of cycles run.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) -> u64 {
        let venues: Vec<String> = self.cycle.venues().iter().map(ToString::to_string).collect();
        info!(
            venues = %venues.join(","),
            interval_secs = self.interval.as_secs(),
            "Poll loop starting"
        );

        if self.online_message && !*shutdown.borrow() {
            if let DispatchOutcome::Delivered { .. } = self.cycle.dispatcher().announce_online(&venues).await {
                info!("Online notice sent");
            }
        }

        let mut interval = tokio::time::interval(self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycles = 0;

        loop {
            if *shutdown.borrow() {
                info!("Shutdown signal received");
                break;
            }
            tokio::select! {
                biased;
                result = shutdown.changed() => {
                    match result {
                        Ok(()) => {
                            if *shutdown.borrow() {
                                info!("Shutdown signal received");
                                break;
                            }
                        }
                        Err(_) => {
                            info!("Shutdown channel closed");
                            break;
                        }
                    }
                }
                _ = interval.tick() => {
                    let report = self.cycle.run(&self.state, &shutdown).await;
                    cycles += 1;
                    report.log();
                    if report.venues_ok == 0 {
                        warn!("No venue answered this cycle");
                    }
                    let cancelled = report.cancelled;
                    *self.last_report.lock() = Some(report);
                    if cancelled {
                        info!("Cycle cancelled by shutdown");
                        break;
                    }
                }
            }
        }

        self.state.send_replace(PollState::Stopped);
        info!(cycles, "Poll loop stopped");
        cycles
    }
}
