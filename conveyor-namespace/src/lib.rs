//! Part of the conveyor simulator.
//!
//! This library defines the traits a device uses to reach the hosting namespace
//! (attribute mirror, event sink, method handlers, lifecycle hooks) along with a
//! small in-memory [AddressSpace] implementing them.
//!
//! # Feature Flags
//!
//! - `channel-sink`: Enables the channel based [EventSink] and recording [AttributeSink] implementations. Disabled by default.
//!

mod attributes;
mod events;
mod lifecycle;
mod methods;
mod space;
mod traits;
mod types;

pub use attributes::AttributeTable;
pub use events::EventBus;
pub use lifecycle::LifecycleManager;
pub use methods::MethodRegistry;
pub use space::AddressSpace;
pub use traits::{AttributeSink, DynAttributeSink, DynEventSink, DynLifecycle, DynMethodHandler, EventSink, Lifecycle, MethodHandler};
pub use types::*;

/// Channel based sinks
///
/// Useful for writing tests that need to observe every write or event a device produces
#[cfg(any(feature = "channel-sink", doc))]
pub mod channel;
