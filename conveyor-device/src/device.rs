use std::sync::Arc;

use async_trait::async_trait;
use conveyor_namespace::{CallRequest, Lifecycle};
use conveyor_types::{constants::START_METHOD, NodeId};
use futures::future::join_all;
use log::info;
use tokio::sync::Mutex;

use crate::{
    config::ConveyorConfig,
    method::ConveyorStartMethod,
    model::ConveyorModel,
    notifier::{EventNotifier, NotifierHandle, NotifierReport},
    ramp::RampSummary,
};

struct Device {
    config: ConveyorConfig,
    node_id: NodeId,
    method_id: NodeId,
    model: ConveyorModel,
    start_method: Arc<ConveyorStartMethod>,
    notifier: EventNotifier,
    running_notifier: Mutex<Option<NotifierHandle>>,
}

/// A handle for interacting with a hosted conveyor.
///
/// The handle is registered as a [Lifecycle] of the namespace: startup starts the event
/// notifier, shutdown stops it and cancels ramps still in flight.
#[derive(Clone)]
pub struct ConveyorHandle {
    device: Arc<Device>,
}

impl std::fmt::Debug for ConveyorHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConveyorHandle")
            .field("node_id", &self.device.node_id)
            .finish_non_exhaustive()
    }
}

impl ConveyorHandle {
    pub(crate) fn new(
        config: ConveyorConfig,
        node_id: NodeId,
        method_id: NodeId,
        model: ConveyorModel,
        start_method: Arc<ConveyorStartMethod>,
        notifier: EventNotifier,
    ) -> Self {
        Self {
            device: Arc::new(Device {
                config,
                node_id,
                method_id,
                model,
                start_method,
                notifier,
                running_notifier: Mutex::new(None),
            }),
        }
    }

    pub fn config(&self) -> &ConveyorConfig {
        &self.device.config
    }

    pub fn model(&self) -> &ConveyorModel {
        &self.device.model
    }

    /// Id of the conveyor object node
    pub fn node_id(&self) -> &NodeId {
        &self.device.node_id
    }

    /// Id of the start method node
    pub fn method_id(&self) -> &NodeId {
        &self.device.method_id
    }

    /// A request invoking the start method on this conveyor
    pub fn start_request(&self) -> CallRequest {
        CallRequest::new(START_METHOD, self.device.node_id.clone())
    }

    pub async fn notifier_running(&self) -> bool {
        self.device.running_notifier.lock().await.is_some()
    }

    /// Wait for every ramp spawned so far to finish
    pub async fn wait_for_ramps(&self) -> Vec<RampSummary> {
        let ramps = self.device.start_method.take_ramps();
        join_all(ramps.into_iter().map(|r| r.join()))
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    /// Cancel every ramp still in flight and wait for them to exit
    pub async fn abort_ramps(&self) {
        let ramps = self.device.start_method.take_ramps();
        if ramps.is_empty() {
            return;
        }
        info!("Cancelling {} ramp(s) of {}", ramps.len(), self.device.config.instance_name);
        for ramp in &ramps {
            ramp.abort();
        }
        join_all(ramps.into_iter().map(|r| r.join())).await;
    }

    async fn stop_notifier(&self) -> Option<NotifierReport> {
        let handle = self.device.running_notifier.lock().await.take()?;
        Some(handle.stop().await)
    }
}

#[async_trait]
impl Lifecycle for ConveyorHandle {
    async fn startup(&self) {
        let mut notifier = self.device.running_notifier.lock().await;
        if notifier.is_some() {
            return;
        }
        info!("Conveyor online. Conveyor = {}", self.device.config.instance_name);
        *notifier = Some(self.device.notifier.clone().start());
    }

    async fn shutdown(&self) {
        if let Some(report) = self.stop_notifier().await {
            info!(
                "Conveyor offline. Conveyor = {} events posted = {}",
                self.device.config.instance_name, report.posted
            );
        }
        self.abort_ramps().await;
    }
}
