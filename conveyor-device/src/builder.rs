use std::sync::Arc;

use conveyor_namespace::{AddressSpace, AttributeSink, DynAttributeSink, DynEventSink, EventSink, MethodNode};
use conveyor_types::{
    constants::{FOLDER, MOTORS, NAMESPACE_INDEX, RUNNING_SPEED, START_METHOD, STATUS},
    ConveyorStatus, DataType, NodeId, Variant,
};
use log::info;

use crate::{
    config::ConveyorConfig,
    device::ConveyorHandle,
    error::BuildError,
    method::ConveyorStartMethod,
    model::{ConveyorModel, PulseSettings},
    notifier::{EventNotifier, EventSource},
    observer::NamespaceMirror,
    ramp::RampController,
};

/// A builder for creating a conveyor hosted in an [AddressSpace].
pub struct ConveyorBuilder<'a> {
    space: &'a AddressSpace,
    config: ConveyorConfig,
    event_sink: Option<Arc<DynEventSink>>,
    attribute_sink: Option<Arc<DynAttributeSink>>,
}

impl<'a> ConveyorBuilder<'a> {
    /// Creates a new builder with the default configuration.
    ///
    /// By default attributes are mirrored into and events are posted to the given address space.
    pub fn new(space: &'a AddressSpace) -> Self {
        Self {
            space,
            config: ConveyorConfig::default(),
            event_sink: None,
            attribute_sink: None,
        }
    }

    pub fn with_config(mut self, config: ConveyorConfig) -> Self {
        self.config = config;
        self
    }

    /// Post events to a custom sink instead of the address space event bus.
    pub fn with_event_sink<S: EventSink + Send + Sync + 'static>(mut self, sink: S) -> Self {
        self.event_sink = Some(Arc::new(sink));
        self
    }

    /// Mirror attributes into a custom sink instead of the address space attribute table.
    pub fn with_attribute_sink<S: AttributeSink + Send + Sync + 'static>(mut self, sink: Arc<S>) -> Self {
        self.attribute_sink = Some(sink);
        self
    }

    fn declare_attributes(&self, object_path: &str) -> Result<(), BuildError> {
        let table = self.space.attributes();
        let declarations = [
            (RUNNING_SPEED, DataType::Double, Variant::Double(0.0)),
            (MOTORS, DataType::UInt16, Variant::UInt16(self.config.motors)),
            (STATUS, DataType::String, ConveyorStatus::Idle.into()),
        ];
        for (name, datatype, initial) in declarations {
            let node_id = NodeId::new(NAMESPACE_INDEX, format!("{object_path}.{name}"));
            table.declare(name, node_id, datatype, initial)?;
        }
        table.log_reads(RUNNING_SPEED);
        Ok(())
    }

    /// Builds the conveyor.
    ///
    /// Declares the conveyor attributes, creates the device model, registers the start method
    /// and adds the conveyor to the namespace lifecycle. Returns an error if the configuration is
    /// invalid or a conveyor has already been registered in the namespace.
    pub fn build(self) -> Result<ConveyorHandle, BuildError> {
        self.config.validate()?;
        let config = self.config.clone();

        let object_path = format!("{FOLDER}/{}", config.instance_name);
        let node_id = NodeId::new(NAMESPACE_INDEX, object_path.clone());
        let method_id = NodeId::new(NAMESPACE_INDEX, format!("{FOLDER}/{START_METHOD}()"));

        self.declare_attributes(&object_path)?;

        let attribute_sink: Arc<DynAttributeSink> = match self.attribute_sink {
            Some(sink) => sink,
            None => self.space.attributes().clone(),
        };
        let event_sink: Arc<DynEventSink> = match self.event_sink {
            Some(sink) => sink,
            None => self.space.events().clone(),
        };

        let model = ConveyorModel::with_pulse(
            config.motors,
            Arc::new(NamespaceMirror::new(attribute_sink)),
            PulseSettings {
                speed: config.pulse_speed,
                settle: config.pulse_settle(),
            },
        );

        let start_method = Arc::new(ConveyorStartMethod::new(
            model.clone(),
            event_sink.clone(),
            config.start_mode,
            config.overlap,
            RampController::new(config.ramp_tick()),
            config.event_severity,
        ));
        self.space.methods().register(
            MethodNode {
                node_id: method_id.clone(),
                browse_name: START_METHOD.to_string(),
                description: "Starts the conveyor".to_string(),
                parent: node_id.clone(),
            },
            start_method.clone(),
        )?;

        let notifier = EventNotifier::new(
            event_sink,
            EventSource {
                node_id: node_id.clone(),
                name: config.instance_name.clone(),
            },
            config.notifier_interval(),
        )
        .with_severity(config.event_severity);

        info!(
            "Conveyor created. Conveyor = {} node = {node_id} mode = {:?}",
            config.instance_name, config.start_mode
        );

        let handle = ConveyorHandle::new(config, node_id, method_id, model, start_method, notifier);
        self.space.lifecycle().add_lifecycle(Arc::new(handle.clone()));
        Ok(handle)
    }
}
