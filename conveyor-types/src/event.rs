use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::{utils::timestamp, NodeId};

#[derive(Error, Debug, PartialEq)]
pub enum EventError {
    #[error("An event requires a source node")]
    MissingSource,
    #[error("An event requires a non empty source name")]
    EmptySourceName,
    #[error("An event requires a non empty message")]
    EmptyMessage,
    #[error("Severity {0} is outside the valid range 1..=1000")]
    InvalidSeverity(u16),
}

/// The event type of a [DeviceEvent]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventType {
    BaseEvent,
}

/// A transient device event.
///
/// Events are plain values: built, posted to an event sink and dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceEvent {
    pub event_id: Uuid,
    pub event_type: EventType,
    pub browse_name: String,
    pub source_node: NodeId,
    pub source_name: String,
    pub message: String,
    pub severity: u16,
    /// milliseconds since epoch
    pub time: u64,
    pub receive_time: Option<u64>,
}

impl DeviceEvent {
    pub fn builder() -> DeviceEventBuilder {
        DeviceEventBuilder::new()
    }

    /// Render the event as a JSON string for logging
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| format!("<unserializable event: {e}>"))
    }
}

/// Builder for a [DeviceEvent]
pub struct DeviceEventBuilder {
    browse_name: Option<String>,
    source_node: Option<NodeId>,
    source_name: Option<String>,
    message: Option<String>,
    severity: u16,
}

impl DeviceEventBuilder {
    fn new() -> Self {
        Self {
            browse_name: None,
            source_node: None,
            source_name: None,
            message: None,
            severity: crate::constants::DEFAULT_EVENT_SEVERITY,
        }
    }

    /// Defaults to the message when not set
    pub fn browse_name<S: Into<String>>(mut self, name: S) -> Self {
        self.browse_name = Some(name.into());
        self
    }

    pub fn source<S: Into<String>>(mut self, node: NodeId, name: S) -> Self {
        self.source_node = Some(node);
        self.source_name = Some(name.into());
        self
    }

    pub fn message<S: Into<String>>(mut self, message: S) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn severity(mut self, severity: u16) -> Self {
        self.severity = severity;
        self
    }

    pub fn build(self) -> Result<DeviceEvent, EventError> {
        let source_node = self.source_node.ok_or(EventError::MissingSource)?;
        let source_name = match self.source_name {
            Some(name) if !name.is_empty() => name,
            _ => return Err(EventError::EmptySourceName),
        };
        let message = match self.message {
            Some(message) if !message.is_empty() => message,
            _ => return Err(EventError::EmptyMessage),
        };
        if !(1..=1000).contains(&self.severity) {
            return Err(EventError::InvalidSeverity(self.severity));
        }

        Ok(DeviceEvent {
            event_id: Uuid::new_v4(),
            event_type: EventType::BaseEvent,
            browse_name: self.browse_name.unwrap_or_else(|| message.clone()),
            source_node,
            source_name,
            message,
            severity: self.severity,
            time: timestamp(),
            receive_time: None,
        })
    }
}
