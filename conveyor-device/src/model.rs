use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use conveyor_types::ConveyorStatus;
use log::{debug, info};
use tokio::{select, sync::Notify, time::sleep};

use crate::observer::DynConveyorObserver;

/// A copy of the conveyor state at one point in time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceState {
    pub status: ConveyorStatus,
    pub motors: u16,
    pub running_speed: f64,
}

/// Speed and hold time of the fixed speed start sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseSettings {
    pub speed: f64,
    pub settle: Duration,
}

impl Default for PulseSettings {
    fn default() -> Self {
        Self {
            speed: 10.0,
            settle: Duration::from_secs(1),
        }
    }
}

struct ModelState {
    device: DeviceState,
    active_runs: usize,
}

struct ModelShared {
    state: Mutex<ModelState>,
    observer: Arc<DynConveyorObserver>,
    settle_interrupt: Notify,
}

impl ModelShared {
    fn lock(&self) -> MutexGuard<'_, ModelState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /* setters are called with the state lock held so notifications are delivered in write order */

    fn set_status(&self, state: &mut ModelState, status: ConveyorStatus) {
        state.device.status = status;
        self.observer.notify_status(status);
    }

    fn set_motors(&self, state: &mut ModelState, motors: u16) {
        state.device.motors = motors;
        self.observer.notify_motors(motors);
    }

    fn set_running_speed(&self, state: &mut ModelState, speed: f64) {
        state.device.running_speed = speed;
        self.observer.notify_running_speed(speed);
    }
}

/// The conveyor state machine.
///
/// All state changes are reported to the [ConveyorObserver](crate::ConveyorObserver) the model
/// was created with. The running speed can only be changed through a [RunGuard] while the
/// conveyor is started; once the last guard is dropped the conveyor returns to idle at speed 0.
#[derive(Clone)]
pub struct ConveyorModel {
    shared: Arc<ModelShared>,
    pulse: PulseSettings,
}

impl ConveyorModel {
    pub fn new(motors: u16, observer: Arc<DynConveyorObserver>) -> Self {
        Self::with_pulse(motors, observer, PulseSettings::default())
    }

    /// Creates the model and notifies the observer of motors, speed and status, in that order.
    pub fn with_pulse(motors: u16, observer: Arc<DynConveyorObserver>, pulse: PulseSettings) -> Self {
        let shared = Arc::new(ModelShared {
            state: Mutex::new(ModelState {
                device: DeviceState {
                    status: ConveyorStatus::Idle,
                    motors,
                    running_speed: 0.0,
                },
                active_runs: 0,
            }),
            observer,
            settle_interrupt: Notify::new(),
        });

        {
            let mut state = shared.lock();
            shared.set_motors(&mut state, motors);
            shared.set_running_speed(&mut state, 0.0);
            shared.set_status(&mut state, ConveyorStatus::Idle);
        }

        Self { shared, pulse }
    }

    pub fn snapshot(&self) -> DeviceState {
        self.shared.lock().device
    }

    pub fn status(&self) -> ConveyorStatus {
        self.snapshot().status
    }

    /// Number of runs currently holding a [RunGuard]
    pub fn active_runs(&self) -> usize {
        self.shared.lock().active_runs
    }

    /// Begin a run, moving the conveyor to started if it was idle.
    pub fn begin_run(&self) -> RunGuard {
        let mut state = self.shared.lock();
        self.enter_run(&mut state)
    }

    /// Begin a run only if no other run is active.
    pub fn try_begin_run(&self) -> Option<RunGuard> {
        let mut state = self.shared.lock();
        if state.active_runs > 0 {
            return None;
        }
        Some(self.enter_run(&mut state))
    }

    fn enter_run(&self, state: &mut ModelState) -> RunGuard {
        state.active_runs += 1;
        if state.active_runs == 1 {
            info!("Conveyor started");
            self.shared.set_status(state, ConveyorStatus::Started);
        }
        RunGuard {
            shared: self.shared.clone(),
        }
    }

    /// Run the fixed speed start sequence: started, nominal speed, hold, speed 0, idle.
    pub async fn start(&self) {
        let guard = self.begin_run();
        self.pulse(guard).await
    }

    /// Drive the pulse sequence with an already acquired guard
    pub async fn pulse(&self, guard: RunGuard) {
        guard.set_speed(self.pulse.speed);
        select! {
            _ = sleep(self.pulse.settle) => (),
            _ = self.shared.settle_interrupt.notified() => debug!("Settle hold interrupted"),
        }
        drop(guard);
    }

    /// Wakes every pending settle hold. The interrupted sequences still finish idle at speed 0.
    pub fn interrupt(&self) {
        self.shared.settle_interrupt.notify_waiters();
    }
}

/// The right to drive the running speed while the conveyor is started.
///
/// Dropping the last live guard sets the speed to 0 and the status to idle, including when the
/// owning task is aborted.
pub struct RunGuard {
    shared: Arc<ModelShared>,
}

impl RunGuard {
    pub fn set_speed(&self, speed: f64) {
        let mut state = self.shared.lock();
        self.shared.set_running_speed(&mut state, speed);
    }
}

impl Drop for RunGuard {
    fn drop(&mut self) {
        let mut state = self.shared.lock();
        state.active_runs = state.active_runs.saturating_sub(1);
        if state.active_runs == 0 {
            self.shared.set_running_speed(&mut state, 0.0);
            self.shared.set_status(&mut state, ConveyorStatus::Idle);
            info!("Conveyor idle");
        }
    }
}
