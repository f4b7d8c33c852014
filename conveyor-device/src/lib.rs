//! Part of the conveyor simulator.
//!
//! This library implements a simulated conveyor hosted in an attribute based namespace:
//! the device state machine, the speed ramp started by the remote `conveyor_start` method,
//! the observer mirroring device state into namespace attributes, and the periodic event
//! notifier bound to namespace startup and shutdown.
//!
//! See [ConveyorBuilder] on how to create a conveyor.

mod builder;
mod config;
mod device;
mod error;
mod method;
mod model;
mod notifier;
mod observer;
mod ramp;

pub use builder::ConveyorBuilder;
pub use config::{ConveyorConfig, OverlapPolicy, StartMode};
pub use device::ConveyorHandle;
pub use error::{BuildError, ConfigError};
pub use method::ConveyorStartMethod;
pub use model::{ConveyorModel, DeviceState, PulseSettings, RunGuard};
pub use notifier::{EventNotifier, EventSource, NotifierHandle, NotifierReport};
pub use observer::{ConveyorObserver, DynConveyorObserver, NamespaceMirror};
pub use ramp::{RampController, RampHandle, RampProfile, RampSummary, RAMP_STEPS};
