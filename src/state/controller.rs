//! Countdown controller: owns the countdown state and its single active run

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError},
    time::Duration,
};
use tokio::{
    runtime::{self, Handle, Runtime},
    sync::watch,
    task::JoinHandle,
};
use tracing::{debug, error, info, warn};

use super::{seconds_remaining, CountdownDisplay, CountdownState, Phase};
use crate::tasks::countdown_timer_task;

/// Countdown length and tick resolution.
///
/// The duration is held in whole seconds (at least one) so the displayed
/// value never exceeds the starting value. Ticks come at least once a second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountdownConfig {
    duration: Duration,
    tick_interval: Duration,
}

impl CountdownConfig {
    pub const MIN_TICK_INTERVAL: Duration = Duration::from_millis(1);
    pub const MAX_TICK_INTERVAL: Duration = Duration::from_secs(1);

    /// Build a config, truncating `duration` to whole seconds (minimum one)
    /// and clamping `tick_interval` to 1ms..=1s.
    pub fn new(duration: Duration, tick_interval: Duration) -> Self {
        Self {
            duration: Duration::from_secs(duration.as_secs().max(1)),
            tick_interval: tick_interval.clamp(Self::MIN_TICK_INTERVAL, Self::MAX_TICK_INTERVAL),
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Whole seconds on the clock when a run starts
    pub fn total_seconds(&self) -> u64 {
        self.duration.as_secs()
    }
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self::new(Duration::from_secs(10), Duration::from_millis(1))
    }
}

/// Identifies one countdown run; signals from an older run are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RunId(u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The run currently allowed to mutate state, plus its timer task
#[derive(Debug, Default)]
struct RunSlot {
    current: u64,
    task: Option<JoinHandle<()>>,
}

#[derive(Debug)]
struct Shared {
    config: CountdownConfig,
    /// Every mutation happens while this lock is held
    slot: Mutex<RunSlot>,
    state_tx: watch::Sender<CountdownState>,
    /// Keep the receiver alive to prevent channel closure
    _state_rx: watch::Receiver<CountdownState>,
    /// Timer runtime for runs started outside any tokio context
    fallback: OnceLock<Runtime>,
}

impl Drop for Shared {
    fn drop(&mut self) {
        // The last handle may be dropped on one of the fallback's own workers
        if let Some(runtime) = self.fallback.take() {
            runtime.shutdown_background();
        }
    }
}

/// Handle to a countdown. Clones share the same state and run.
#[derive(Debug, Clone)]
pub struct CountdownController {
    shared: Arc<Shared>,
}

impl CountdownController {
    /// Create an idle controller
    pub fn new(config: CountdownConfig) -> Self {
        let (state_tx, state_rx) = watch::channel(CountdownState::idle(config.total_seconds()));

        Self {
            shared: Arc::new(Shared {
                config,
                slot: Mutex::new(RunSlot::default()),
                state_tx,
                _state_rx: state_rx,
                fallback: OnceLock::new(),
            }),
        }
    }

    pub fn config(&self) -> CountdownConfig {
        self.shared.config
    }

    /// Start a fresh run, cancelling any run in flight.
    ///
    /// The ticks come from a task on the caller's tokio runtime, or on a
    /// private single-worker runtime when called from outside one.
    pub fn start(&self) -> RunId {
        let mut slot = self.lock_slot();

        if let Some(task) = slot.task.take() {
            if !task.is_finished() {
                info!("Cancelling countdown run #{}", slot.current);
            }
            task.abort();
        }

        slot.current += 1;
        let run = RunId(slot.current);
        let total = self.shared.config.total_seconds();
        self.shared.state_tx.send_replace(CountdownState::running(total));

        let timer = countdown_timer_task(self.clone(), run);
        slot.task = self.timer_handle().map(|handle| handle.spawn(timer));
        info!("Countdown run {} started: {}s", run, total);
        run
    }

    /// Apply a tick carrying the time elapsed since `run` started.
    ///
    /// Returns whether observers were notified. A tick at or past the
    /// deadline finishes the run.
    pub fn on_tick(&self, run: RunId, elapsed: Duration) -> bool {
        let slot = self.lock_slot();
        if slot.current != run.0 {
            debug!("Ignoring tick from superseded run {}", run);
            return false;
        }

        let seconds = seconds_remaining(self.shared.config.duration, elapsed);
        if seconds == 0 {
            return self.finish(slot, run);
        }

        let published = self.shared.state_tx.send_if_modified(|state| {
            if !state.is_running || state.seconds_remaining == seconds {
                return false;
            }
            state.seconds_remaining = seconds;
            true
        });

        if published {
            debug!("Run {}: {}s remaining", run, seconds);
        }
        published
    }

    /// Mark `run` as finished. Returns false if it was stale or already done.
    pub fn on_finish(&self, run: RunId) -> bool {
        let slot = self.lock_slot();
        if slot.current != run.0 {
            debug!("Ignoring finish from superseded run {}", run);
            return false;
        }
        self.finish(slot, run)
    }

    fn finish(&self, mut slot: MutexGuard<'_, RunSlot>, run: RunId) -> bool {
        if !self.shared.state_tx.borrow().is_running {
            return false;
        }

        self.shared.state_tx.send_replace(CountdownState::finished());
        // The finishing task is the one holding this handle; detach it
        slot.task = None;
        info!("Countdown run {} finished: lift off", run);
        true
    }

    /// Abort the active run without touching the published state
    pub fn shutdown(&self) {
        let mut slot = self.lock_slot();
        if let Some(task) = slot.task.take() {
            task.abort();
            info!("Countdown run #{} aborted on shutdown", slot.current);
        }
        slot.current += 1;
    }

    /// Whether `run` is still the run allowed to mutate state
    pub fn is_current(&self, run: RunId) -> bool {
        self.lock_slot().current == run.0
    }

    /// Observe state changes; the receiver already holds the current state
    pub fn subscribe(&self) -> watch::Receiver<CountdownState> {
        self.shared.state_tx.subscribe()
    }

    pub fn snapshot(&self) -> CountdownState {
        *self.shared.state_tx.borrow()
    }

    pub fn phase(&self) -> Phase {
        self.snapshot().phase()
    }

    pub fn display(&self) -> CountdownDisplay {
        CountdownDisplay::new(&self.snapshot(), self.shared.config.total_seconds())
    }

    fn timer_handle(&self) -> Option<Handle> {
        if let Ok(handle) = Handle::try_current() {
            return Some(handle);
        }
        if let Some(runtime) = self.shared.fallback.get() {
            return Some(runtime.handle().clone());
        }

        warn!("start() called outside a tokio runtime, creating a timer runtime");
        let built = runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("lift-off-timer")
            .enable_time()
            .build();

        match built {
            Ok(runtime) => {
                // Callers hold the slot lock, so nobody else can have set it
                let _ = self.shared.fallback.set(runtime);
                self.shared.fallback.get().map(|runtime| runtime.handle().clone())
            }
            Err(e) => {
                error!("Failed to build timer runtime, countdown will not tick: {}", e);
                None
            }
        }
    }

    fn lock_slot(&self) -> MutexGuard<'_, RunSlot> {
        // No invariant spans a panic inside the lock, so a poisoned slot is still usable
        self.shared.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CountdownController {
    fn default() -> Self {
        Self::new(CountdownConfig::default())
    }
}
