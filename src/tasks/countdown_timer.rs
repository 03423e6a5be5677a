//! Countdown timer background task

use tokio::time::{interval, sleep_until, Instant, MissedTickBehavior};
use tracing::debug;

use crate::state::{CountdownController, RunId};

/// Drive one countdown run: tick at the configured interval until the
/// duration has elapsed, then finish the run.
///
/// The deadline is awaited on its own, so the run finishes on time whether
/// or not the tick interval divides the duration. Exits early once `run` has
/// been superseded by a newer `start()`.
pub async fn countdown_timer_task(controller: CountdownController, run: RunId) {
    let config = controller.config();
    let started = Instant::now();

    let mut ticker = interval(config.tick_interval());
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let deadline = sleep_until(started + config.duration());
    tokio::pin!(deadline);

    loop {
        tokio::select! {
            biased;

            _ = &mut deadline => {
                controller.on_finish(run);
                break;
            }
            _ = ticker.tick() => {
                if !controller.on_tick(run, started.elapsed()) && !controller.is_current(run) {
                    debug!("Run {} superseded, stopping its timer", run);
                    break;
                }
            }
        }
    }
}
