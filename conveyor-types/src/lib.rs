//! Part of the conveyor simulator, a single industrial conveyor exposed through an
//! attribute based namespace.
//!
//! This library defines the value, identifier and event types shared between the
//! namespace layer and the device.

pub mod constants;
pub mod utils;

mod event;
mod node;
mod status;
mod value;

pub use event::*;
pub use node::*;
pub use status::*;
pub use value::*;
