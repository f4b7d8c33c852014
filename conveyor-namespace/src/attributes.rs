use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use conveyor_types::{DataType, DataValue, NodeId, Variant};
use log::{debug, info};

use crate::{AttributeSink, RegistrationError, SinkError};

struct Attribute {
    node_id: NodeId,
    datatype: DataType,
    value: DataValue,
    log_reads: bool,
}

/// The in-memory table of attributes readable by remote clients.
///
/// Every attribute is declared once with a datatype; writes are checked against it.
/// Reads and writes of a single attribute are atomic.
pub struct AttributeTable {
    attributes: RwLock<HashMap<String, Attribute>>,
}

impl AttributeTable {
    pub fn new() -> Self {
        Self {
            attributes: RwLock::new(HashMap::new()),
        }
    }

    pub fn declare<S: Into<String>>(
        &self,
        name: S,
        node_id: NodeId,
        datatype: DataType,
        initial: Variant,
    ) -> Result<(), RegistrationError> {
        let name = name.into();
        if initial.datatype() != datatype {
            return Err(RegistrationError::InitialValueMismatch {
                attribute: name,
                expected: datatype,
            });
        }
        let mut attributes = self.attributes.write().unwrap_or_else(PoisonError::into_inner);
        if attributes.contains_key(&name) {
            return Err(RegistrationError::DuplicateAttribute(name));
        }
        debug!("Declared attribute {name} ({datatype}) as {node_id}");
        attributes.insert(
            name,
            Attribute {
                node_id,
                datatype,
                value: DataValue::new(initial),
                log_reads: false,
            },
        );
        Ok(())
    }

    /// Log every read of the named attribute. Returns false if the attribute is not declared.
    pub fn log_reads(&self, name: &str) -> bool {
        let mut attributes = self.attributes.write().unwrap_or_else(PoisonError::into_inner);
        match attributes.get_mut(name) {
            Some(attribute) => {
                attribute.log_reads = true;
                true
            }
            None => false,
        }
    }

    pub fn read(&self, name: &str) -> Option<DataValue> {
        let attributes = self.attributes.read().unwrap_or_else(PoisonError::into_inner);
        let attribute = attributes.get(name)?;
        if attribute.log_reads {
            info!("Read {name} ({}) = {}", attribute.node_id, attribute.value.value);
        }
        Some(attribute.value.clone())
    }

    /// Convenience for reading the current value only
    pub fn value(&self, name: &str) -> Option<Variant> {
        self.read(name).map(|v| v.value)
    }

    pub fn node_id(&self, name: &str) -> Option<NodeId> {
        let attributes = self.attributes.read().unwrap_or_else(PoisonError::into_inner);
        attributes.get(name).map(|a| a.node_id.clone())
    }

    pub fn len(&self) -> usize {
        self.attributes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for AttributeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl AttributeSink for AttributeTable {
    fn write(&self, attribute: &str, value: Variant) -> Result<(), SinkError> {
        let mut attributes = self.attributes.write().unwrap_or_else(PoisonError::into_inner);
        let entry = attributes
            .get_mut(attribute)
            .ok_or_else(|| SinkError::UnknownAttribute(attribute.to_string()))?;
        if entry.datatype != value.datatype() {
            return Err(SinkError::TypeMismatch {
                attribute: attribute.to_string(),
                expected: entry.datatype,
                actual: value.datatype(),
            });
        }
        entry.value = DataValue::new(value);
        Ok(())
    }
}
