use std::sync::Arc;

use conveyor_namespace::DynAttributeSink;
use conveyor_types::{
    constants::{MOTORS, RUNNING_SPEED, STATUS},
    ConveyorStatus, Variant,
};
use log::warn;

pub type DynConveyorObserver = dyn ConveyorObserver + Send + Sync;

/// Receives every attribute change of a [ConveyorModel](crate::ConveyorModel).
///
/// Calls are made synchronously and in write order. Implementations must return
/// promptly and handle their own failures.
pub trait ConveyorObserver {
    fn notify_running_speed(&self, value: f64);
    fn notify_motors(&self, value: u16);
    fn notify_status(&self, status: ConveyorStatus);
}

/// Mirrors conveyor state into the attributes of the hosting namespace
pub struct NamespaceMirror {
    sink: Arc<DynAttributeSink>,
}

impl NamespaceMirror {
    pub fn new(sink: Arc<DynAttributeSink>) -> Self {
        Self { sink }
    }

    fn mirror(&self, attribute: &str, value: Variant) {
        if let Err(e) = self.sink.write(attribute, value) {
            warn!("Unable to mirror {attribute}: {e}");
        }
    }
}

impl ConveyorObserver for NamespaceMirror {
    fn notify_running_speed(&self, value: f64) {
        self.mirror(RUNNING_SPEED, Variant::Double(value));
    }

    fn notify_motors(&self, value: u16) {
        self.mirror(MOTORS, Variant::UInt16(value));
    }

    fn notify_status(&self, status: ConveyorStatus) {
        self.mirror(STATUS, status.into());
    }
}
