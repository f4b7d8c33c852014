use conveyor_types::{DataType, NodeId};
use thiserror::Error;

/// Errors returned by [AttributeSink](crate::AttributeSink) and [EventSink](crate::EventSink) implementations
#[derive(Error, Debug, PartialEq)]
pub enum SinkError {
    #[error("Unknown attribute {0}")]
    UnknownAttribute(String),
    #[error("Attribute {attribute} expects {expected} but got {actual}")]
    TypeMismatch {
        attribute: String,
        expected: DataType,
        actual: DataType,
    },
    #[error("Sink closed")]
    Closed,
    #[error("{0}")]
    Other(String),
}

/// Errors reported to the caller of a method
#[derive(Error, Debug, PartialEq)]
pub enum MethodError {
    #[error("Unknown method {0}")]
    UnknownMethod(String),
    #[error("Expected {expected} input arguments but got {actual}")]
    InvalidArguments { expected: usize, actual: usize },
    #[error("Invalid state: {0}")]
    InvalidState(String),
    #[error("Method failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum RegistrationError {
    #[error("Duplicate method {0}")]
    DuplicateMethod(String),
    #[error("Duplicate attribute {0}")]
    DuplicateAttribute(String),
    #[error("Initial value for {attribute} does not match declared type {expected}")]
    InitialValueMismatch { attribute: String, expected: DataType },
}

/// Describes a method input or output argument
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: String,
    pub datatype: DataType,
    pub description: String,
}

impl Argument {
    pub fn new<S1: Into<String>, S2: Into<String>>(name: S1, datatype: DataType, description: S2) -> Self {
        Self {
            name: name.into(),
            datatype,
            description: description.into(),
        }
    }
}

/// The method node a handler is registered under
#[derive(Debug, Clone, PartialEq)]
pub struct MethodNode {
    pub node_id: NodeId,
    /// The name the method is invoked by
    pub browse_name: String,
    pub description: String,
    /// The object the method is a component of
    pub parent: NodeId,
}

/// Details about a single method invocation
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationContext {
    pub method_id: NodeId,
    /// The object the method was invoked on
    pub object_id: NodeId,
    /// The session or client that invoked the method, if known
    pub caller: Option<String>,
}

/// A request to invoke a registered method
#[derive(Debug, Clone, PartialEq)]
pub struct CallRequest {
    pub method: String,
    pub object_id: NodeId,
    pub caller: Option<String>,
    pub inputs: Vec<conveyor_types::Variant>,
}

impl CallRequest {
    pub fn new<S: Into<String>>(method: S, object_id: NodeId) -> Self {
        Self {
            method: method.into(),
            object_id,
            caller: None,
            inputs: Vec::new(),
        }
    }

    pub fn caller<S: Into<String>>(mut self, caller: S) -> Self {
        self.caller = Some(caller.into());
        self
    }

    pub fn inputs(mut self, inputs: Vec<conveyor_types::Variant>) -> Self {
        self.inputs = inputs;
        self
    }
}
