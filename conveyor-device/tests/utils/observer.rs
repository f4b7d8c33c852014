use std::sync::{Arc, Mutex};

use conveyor_device::ConveyorObserver;
use conveyor_types::ConveyorStatus;
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Speed(f64),
    Motors(u16),
    Status(ConveyorStatus),
}

/// Records every notification a model makes, in order
#[derive(Default)]
pub struct RecordingObserver {
    log: Mutex<Vec<Notification>>,
    speed_times: Mutex<Vec<(Instant, f64)>>,
}

impl RecordingObserver {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.log.lock().unwrap().clone()
    }

    /// Notifications after the first `skip`, typically the three made on construction
    pub fn notifications_after(&self, skip: usize) -> Vec<Notification> {
        self.notifications().into_iter().skip(skip).collect()
    }

    pub fn speeds(&self) -> Vec<f64> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Speed(s) => Some(s),
                _ => None,
            })
            .collect()
    }

    /// Every speed write with the time it was made
    pub fn timed_speeds(&self) -> Vec<(Instant, f64)> {
        self.speed_times.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<ConveyorStatus> {
        self.notifications()
            .into_iter()
            .filter_map(|n| match n {
                Notification::Status(s) => Some(s),
                _ => None,
            })
            .collect()
    }
}

impl ConveyorObserver for RecordingObserver {
    fn notify_running_speed(&self, value: f64) {
        self.log.lock().unwrap().push(Notification::Speed(value));
        self.speed_times.lock().unwrap().push((Instant::now(), value));
    }

    fn notify_motors(&self, value: u16) {
        self.log.lock().unwrap().push(Notification::Motors(value));
    }

    fn notify_status(&self, status: ConveyorStatus) {
        self.log.lock().unwrap().push(Notification::Status(status));
    }
}
