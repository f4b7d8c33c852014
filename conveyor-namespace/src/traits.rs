use std::sync::Arc;

use async_trait::async_trait;
use conveyor_types::{DeviceEvent, Variant};

use crate::{Argument, InvocationContext, MethodError, SinkError};

/// The mirror of device attributes readable by remote clients.
pub trait AttributeSink {
    /// Writes a new value for the named attribute.
    ///
    /// # Returns
    ///
    /// - `Ok(())` if the value was stored
    /// - `Err(SinkError)` if the attribute is unknown or the value has the wrong datatype
    fn write(&self, attribute: &str, value: Variant) -> Result<(), SinkError>;
}

pub type DynAttributeSink = dyn AttributeSink + Send + Sync;

impl<T: AttributeSink + ?Sized> AttributeSink for Arc<T> {
    fn write(&self, attribute: &str, value: Variant) -> Result<(), SinkError> {
        (**self).write(attribute, value)
    }
}

/// The shared channel device events are broadcast through.
pub trait EventSink {
    /// Posts an event. The sink takes ownership; the caller keeps no reference to it.
    fn post(&self, event: DeviceEvent) -> Result<(), SinkError>;
}

pub type DynEventSink = dyn EventSink + Send + Sync;

impl<T: EventSink + ?Sized> EventSink for Arc<T> {
    fn post(&self, event: DeviceEvent) -> Result<(), SinkError> {
        (**self).post(event)
    }
}

/// A remotely invocable method.
#[async_trait]
pub trait MethodHandler {
    fn input_arguments(&self) -> Vec<Argument>;

    fn output_arguments(&self) -> Vec<Argument>;

    /// Invoke the method. The input count has already been validated against
    /// [MethodHandler::input_arguments].
    async fn invoke(
        &self,
        context: &InvocationContext,
        inputs: Vec<Variant>,
    ) -> Result<Vec<Variant>, MethodError>;
}

pub type DynMethodHandler = dyn MethodHandler + Send + Sync;

/// Hooks run when the owning namespace starts up or shuts down.
#[async_trait]
pub trait Lifecycle {
    async fn startup(&self);

    /// Must not return until all background work started by `startup` has stopped.
    async fn shutdown(&self);
}

pub type DynLifecycle = dyn Lifecycle + Send + Sync;
