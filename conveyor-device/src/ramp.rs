use std::{sync::Arc, time::Duration};

use log::{debug, error};
use tokio::{select, sync::Notify, task::JoinHandle, time::sleep};

use crate::model::RunGuard;

/// Number of steps in one ramp
pub const RAMP_STEPS: u32 = 29;

/// The triangular speed profile of a start ramp.
///
/// Rises by 2 per step, holds at 20 from step 10 to 19, then falls by 2 per step.
pub struct RampProfile;

impl RampProfile {
    pub fn speed(step: u32) -> f64 {
        if step < 10 {
            2.0 * step as f64
        } else if step < 20 {
            20.0
        } else {
            2.0 * 30_u32.saturating_sub(step) as f64
        }
    }

    /// `(step, speed)` for every step of the ramp, starting at step 1
    pub fn steps() -> impl Iterator<Item = (u32, f64)> {
        (1..=RAMP_STEPS).map(|step| (step, Self::speed(step)))
    }

    /// The nominal time a ramp takes at the given tick interval
    pub fn duration(tick: Duration) -> Duration {
        tick * RAMP_STEPS
    }
}

/// Outcome of a finished ramp
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RampSummary {
    pub steps: u32,
    pub interrupted_ticks: u32,
}

/// Spawns detached speed ramps
#[derive(Debug, Clone, Copy)]
pub struct RampController {
    tick: Duration,
}

impl RampController {
    pub fn new(tick: Duration) -> Self {
        Self { tick }
    }

    pub fn tick(&self) -> Duration {
        self.tick
    }

    /// Start a ramp on its own task. The guard is released once the last step has elapsed.
    pub fn spawn(&self, guard: RunGuard) -> RampHandle {
        let interrupt = Arc::new(Notify::new());
        let task = tokio::spawn(run_ramp(guard, self.tick, interrupt.clone()));
        RampHandle { task, interrupt }
    }
}

async fn run_ramp(guard: RunGuard, tick: Duration, interrupt: Arc<Notify>) -> RampSummary {
    let mut summary = RampSummary::default();
    for (step, speed) in RampProfile::steps() {
        debug!("Ramp step {step}: running speed {speed}");
        guard.set_speed(speed);
        summary.steps += 1;

        select! {
            _ = sleep(tick) => (),
            _ = interrupt.notified() => summary.interrupted_ticks += 1,
        }
    }
    drop(guard);
    summary
}

/// A handle to a running ramp.
///
/// Dropping the handle does not stop the ramp.
pub struct RampHandle {
    task: JoinHandle<RampSummary>,
    interrupt: Arc<Notify>,
}

impl RampHandle {
    /// Cut the current tick short. The ramp continues with the next step.
    pub fn interrupt(&self) {
        self.interrupt.notify_one();
    }

    /// Cancel the ramp. Its guard is dropped, returning the conveyor to idle if no other run is active.
    pub fn abort(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the ramp to end. Returns `None` if it was aborted or panicked.
    pub async fn join(self) -> Option<RampSummary> {
        match self.task.await {
            Ok(summary) => Some(summary),
            Err(e) => {
                if e.is_panic() {
                    error!("Ramp task panicked: {e}");
                }
                None
            }
        }
    }
}
