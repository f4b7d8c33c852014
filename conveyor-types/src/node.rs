use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The identifier part of a [NodeId]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Identifier {
    String(String),
    Guid(Uuid),
}

/// Identifies a node in the address space
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub namespace: u16,
    pub identifier: Identifier,
}

impl NodeId {
    pub fn new<S: Into<String>>(namespace: u16, identifier: S) -> Self {
        Self {
            namespace,
            identifier: Identifier::String(identifier.into()),
        }
    }

    /// Create a node id with a random guid identifier
    pub fn new_guid(namespace: u16) -> Self {
        Self {
            namespace,
            identifier: Identifier::Guid(Uuid::new_v4()),
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identifier {
            Identifier::String(s) => write!(f, "ns={};s={}", self.namespace, s),
            Identifier::Guid(g) => write!(f, "ns={};g={}", self.namespace, g),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let id = NodeId::new(1, "IntelligentIndustry/Conveyor-1");
        assert_eq!(id.to_string(), "ns=1;s=IntelligentIndustry/Conveyor-1");

        let guid = NodeId::new_guid(1);
        assert!(guid.to_string().starts_with("ns=1;g="));
        assert_ne!(guid, NodeId::new_guid(1));
    }
}
