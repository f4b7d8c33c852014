use std::sync::atomic::{AtomicU64, Ordering};

use conveyor_types::DeviceEvent;
use log::trace;
use tokio::sync::broadcast;

use crate::{EventSink, SinkError};

const DEFAULT_CAPACITY: usize = 64;

/// Broadcasts posted events to every current subscriber.
///
/// Posting with no subscribers is not an error, the event is simply dropped.
pub struct EventBus {
    tx: broadcast::Sender<DeviceEvent>,
    posted: AtomicU64,
}

impl EventBus {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(DEFAULT_CAPACITY);
        Self {
            tx,
            posted: AtomicU64::new(0),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<DeviceEvent> {
        self.tx.subscribe()
    }

    /// Total number of events posted to the bus
    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::SeqCst)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for EventBus {
    fn post(&self, event: DeviceEvent) -> Result<(), SinkError> {
        trace!("Posting event {}", event.to_json());
        self.posted.fetch_add(1, Ordering::SeqCst);
        _ = self.tx.send(event);
        Ok(())
    }
}
