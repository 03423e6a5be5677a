//! Countdown state structure and the remaining-seconds formula

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Snapshot of a countdown published to observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownState {
    /// Whole seconds left, shown on the display
    pub seconds_remaining: u64,
    pub is_running: bool,
    pub is_finished: bool,
}

/// Coarse lifecycle of a countdown, derived from the two flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Running,
    Finished,
}

impl CountdownState {
    /// Create an idle state with the full duration on the clock
    pub fn idle(total_seconds: u64) -> Self {
        Self {
            seconds_remaining: total_seconds,
            is_running: false,
            is_finished: false,
        }
    }

    /// Create the state a fresh run begins with
    pub fn running(total_seconds: u64) -> Self {
        Self {
            seconds_remaining: total_seconds,
            is_running: true,
            is_finished: false,
        }
    }

    /// Create the terminal state of a run
    pub fn finished() -> Self {
        Self {
            seconds_remaining: 0,
            is_running: false,
            is_finished: true,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_running {
            Phase::Running
        } else if self.is_finished {
            Phase::Finished
        } else {
            Phase::Idle
        }
    }
}

/// Seconds left on a countdown of `total` after `elapsed`, rounded up.
///
/// A countdown with 9.5s elapsed out of 10s still shows 1; only a fully
/// elapsed countdown shows 0.
pub fn seconds_remaining(total: Duration, elapsed: Duration) -> u64 {
    let remaining_ms = total.as_millis().saturating_sub(elapsed.as_millis());
    remaining_ms.div_ceil(1000) as u64
}
