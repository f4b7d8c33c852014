use std::sync::atomic::{AtomicU64, Ordering};

use conveyor_namespace::{EventSink, SinkError};
use conveyor_types::DeviceEvent;

/// An event sink that rejects every event
pub struct FailingEventSink;

impl EventSink for FailingEventSink {
    fn post(&self, _event: DeviceEvent) -> Result<(), SinkError> {
        Err(SinkError::Other("event bus unavailable".into()))
    }
}

/// An event sink that rejects every other event, starting with the first
#[derive(Default)]
pub struct FlakyEventSink {
    attempts: AtomicU64,
    accepted: AtomicU64,
}

impl FlakyEventSink {
    pub fn attempts(&self) -> u64 {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn accepted(&self) -> u64 {
        self.accepted.load(Ordering::SeqCst)
    }
}

impl EventSink for FlakyEventSink {
    fn post(&self, _event: DeviceEvent) -> Result<(), SinkError> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
        if attempt % 2 == 0 {
            return Err(SinkError::Other("dropped".into()));
        }
        self.accepted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
