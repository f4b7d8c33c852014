use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use conveyor_types::Variant;
use log::{info, warn};

use crate::{CallRequest, DynMethodHandler, InvocationContext, MethodError, MethodNode, MethodHandler, RegistrationError};

struct RegisteredMethod {
    node: MethodNode,
    handler: Arc<DynMethodHandler>,
}

/// Registry of remotely invocable methods keyed by browse name
pub struct MethodRegistry {
    methods: Mutex<HashMap<String, RegisteredMethod>>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: Mutex::new(HashMap::new()),
        }
    }

    /// Registers a handler for a method node.
    ///
    /// Returns an error if a method with the same browse name is already registered.
    pub fn register<H>(&self, node: MethodNode, handler: Arc<H>) -> Result<(), RegistrationError>
    where
        H: MethodHandler + Send + Sync + 'static,
    {
        let mut methods = self.methods.lock().unwrap_or_else(PoisonError::into_inner);
        if methods.contains_key(&node.browse_name) {
            return Err(RegistrationError::DuplicateMethod(node.browse_name));
        }
        info!(
            "Registered method {} ({}) on {}",
            node.browse_name, node.node_id, node.parent
        );
        methods.insert(node.browse_name.clone(), RegisteredMethod { node, handler });
        Ok(())
    }

    pub fn unregister(&self, name: &str) {
        self.methods
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    pub fn node(&self, name: &str) -> Option<MethodNode> {
        let methods = self.methods.lock().unwrap_or_else(PoisonError::into_inner);
        methods.get(name).map(|m| m.node.clone())
    }

    /// Invokes a registered method after validating the number of input arguments
    pub async fn call(&self, request: CallRequest) -> Result<Vec<Variant>, MethodError> {
        let (node, handler) = {
            let methods = self.methods.lock().unwrap_or_else(PoisonError::into_inner);
            match methods.get(&request.method) {
                Some(m) => (m.node.clone(), m.handler.clone()),
                None => return Err(MethodError::UnknownMethod(request.method)),
            }
        };

        let expected = handler.input_arguments().len();
        if request.inputs.len() != expected {
            warn!(
                "Rejected call to {}: expected {expected} inputs, got {}",
                node.browse_name,
                request.inputs.len()
            );
            return Err(MethodError::InvalidArguments {
                expected,
                actual: request.inputs.len(),
            });
        }

        let context = InvocationContext {
            method_id: node.node_id,
            object_id: request.object_id,
            caller: request.caller,
        };
        handler.invoke(&context, request.inputs).await
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::new()
    }
}
