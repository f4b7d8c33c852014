use std::sync::{Mutex, PoisonError};

use conveyor_types::{DeviceEvent, Variant};
use tokio::sync::mpsc;

use crate::{AttributeSink, EventSink, SinkError};

/// An [EventSink] that forwards every posted event into a channel.
///
/// # Examples
///
/// ```ignore
/// use conveyor_namespace::{EventSink, channel::ChannelEventSink};
///
/// let (sink, mut rx) = ChannelEventSink::new();
/// // hand `sink` to a device, then inspect what it posted
/// let event = rx.try_recv();
/// ```
pub struct ChannelEventSink {
    tx: mpsc::UnboundedSender<DeviceEvent>,
}

impl ChannelEventSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DeviceEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl EventSink for ChannelEventSink {
    fn post(&self, event: DeviceEvent) -> Result<(), SinkError> {
        self.tx.send(event).map_err(|_| SinkError::Closed)
    }
}

/// An [AttributeSink] that records every write in order
pub struct RecordingAttributeSink {
    writes: Mutex<Vec<(String, Variant)>>,
}

impl RecordingAttributeSink {
    pub fn new() -> Self {
        Self {
            writes: Mutex::new(Vec::new()),
        }
    }

    /// All writes so far
    pub fn writes(&self) -> Vec<(String, Variant)> {
        self.writes.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Writes made to a single attribute, in order
    pub fn writes_to(&self, attribute: &str) -> Vec<Variant> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(name, _)| name == attribute)
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl Default for RecordingAttributeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSink for RecordingAttributeSink {
    fn write(&self, attribute: &str, value: Variant) -> Result<(), SinkError> {
        self.writes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((attribute.to_string(), value));
        Ok(())
    }
}
