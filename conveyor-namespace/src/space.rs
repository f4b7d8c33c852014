use std::sync::Arc;

use conveyor_types::Variant;
use log::info;

use crate::{AttributeTable, CallRequest, EventBus, LifecycleManager, MethodError, MethodRegistry};

/// An in-memory namespace: attributes, events, methods and lifecycle hooks under one URI.
///
/// A stand-in for the address space of a real server, implementing only what a hosted device needs.
pub struct AddressSpace {
    uri: String,
    attributes: Arc<AttributeTable>,
    events: Arc<EventBus>,
    methods: MethodRegistry,
    lifecycle: LifecycleManager,
}

impl AddressSpace {
    pub fn new<S: Into<String>>(uri: S) -> Self {
        Self {
            uri: uri.into(),
            attributes: Arc::new(AttributeTable::new()),
            events: Arc::new(EventBus::new()),
            methods: MethodRegistry::new(),
            lifecycle: LifecycleManager::new(),
        }
    }

    pub fn attributes(&self) -> &Arc<AttributeTable> {
        &self.attributes
    }

    pub fn events(&self) -> &Arc<EventBus> {
        &self.events
    }

    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    pub fn lifecycle(&self) -> &LifecycleManager {
        &self.lifecycle
    }

    /// Invoke a method registered in this namespace
    pub async fn call(&self, request: CallRequest) -> Result<Vec<Variant>, MethodError> {
        self.methods.call(request).await
    }

    /// Run all registered startup hooks
    pub async fn startup(&self) {
        info!("Namespace starting. uri = {}", self.uri);
        self.lifecycle.startup().await;
    }

    /// Run all registered shutdown hooks, returning once they have completed
    pub async fn shutdown(&self) {
        info!("Namespace stopping. uri = {}", self.uri);
        self.lifecycle.shutdown().await;
        info!("Namespace stopped. uri = {}", self.uri);
    }
}
