use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use conveyor_namespace::{Argument, DynEventSink, InvocationContext, MethodError, MethodHandler};
use conveyor_types::{
    constants::{START_EVENT_MESSAGE, START_EVENT_NAME, START_RESULT, START_RESULT_DESCRIPTION, START_SUCCEEDED},
    DataType, DeviceEvent, Variant,
};
use log::{debug, info};

use crate::{
    config::{OverlapPolicy, StartMode},
    model::{ConveyorModel, RunGuard},
    ramp::{RampController, RampHandle},
};

/// Handler of the remote start command.
///
/// Posts a start event, then runs the conveyor according to its [StartMode]. In ramp mode the
/// call returns as soon as the ramp task has been spawned.
pub struct ConveyorStartMethod {
    model: ConveyorModel,
    events: Arc<DynEventSink>,
    mode: StartMode,
    overlap: OverlapPolicy,
    ramp: RampController,
    severity: u16,
    ramps: Mutex<Vec<RampHandle>>,
}

impl ConveyorStartMethod {
    pub fn new(
        model: ConveyorModel,
        events: Arc<DynEventSink>,
        mode: StartMode,
        overlap: OverlapPolicy,
        ramp: RampController,
        severity: u16,
    ) -> Self {
        Self {
            model,
            events,
            mode,
            overlap,
            ramp,
            severity,
            ramps: Mutex::new(Vec::new()),
        }
    }

    fn start_event(&self, context: &InvocationContext) -> Result<DeviceEvent, MethodError> {
        DeviceEvent::builder()
            .browse_name(START_EVENT_NAME)
            .source(context.object_id.clone(), context.object_id.to_string())
            .message(START_EVENT_MESSAGE)
            .severity(self.severity)
            .build()
            .map_err(|e| MethodError::Failed(format!("unable to create start event: {e}")))
    }

    fn check_idle(&self) -> Result<(), MethodError> {
        match self.overlap {
            OverlapPolicy::Reject if self.model.active_runs() > 0 => {
                Err(MethodError::InvalidState("conveyor is already running".into()))
            }
            _ => Ok(()),
        }
    }

    /// Only called once the start event has been posted, so a failed command never touches the device state
    fn acquire_run(&self) -> Result<RunGuard, MethodError> {
        match self.overlap {
            OverlapPolicy::Allow => Ok(self.model.begin_run()),
            OverlapPolicy::Reject => self
                .model
                .try_begin_run()
                .ok_or_else(|| MethodError::InvalidState("conveyor is already running".into())),
        }
    }

    fn track(&self, handle: RampHandle) {
        let mut ramps = self.ramps.lock().unwrap_or_else(PoisonError::into_inner);
        ramps.retain(|r| !r.is_finished());
        ramps.push(handle);
    }

    /// Take the handles of all ramps spawned so far that have not been taken yet
    pub fn take_ramps(&self) -> Vec<RampHandle> {
        std::mem::take(&mut *self.ramps.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

#[async_trait]
impl MethodHandler for ConveyorStartMethod {
    fn input_arguments(&self) -> Vec<Argument> {
        Vec::new()
    }

    fn output_arguments(&self) -> Vec<Argument> {
        vec![Argument::new(START_RESULT, DataType::String, START_RESULT_DESCRIPTION)]
    }

    async fn invoke(
        &self,
        context: &InvocationContext,
        _inputs: Vec<Variant>,
    ) -> Result<Vec<Variant>, MethodError> {
        info!(
            "{} was invoked on object {} by {}",
            context.method_id,
            context.object_id,
            context.caller.as_deref().unwrap_or("<anonymous>")
        );

        let event = self.start_event(context)?;
        self.check_idle()?;
        self.events
            .post(event)
            .map_err(|e| MethodError::Failed(format!("unable to post start event: {e}")))?;
        let guard = self.acquire_run()?;

        match self.mode {
            StartMode::Ramp => {
                debug!("Spawning ramp with tick {:?}", self.ramp.tick());
                let handle = self.ramp.spawn(guard);
                self.track(handle);
            }
            StartMode::Pulse => self.model.pulse(guard).await,
        }

        Ok(vec![Variant::from(START_SUCCEEDED)])
    }
}
