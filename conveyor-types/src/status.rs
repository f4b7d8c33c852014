use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Variant;

/// Run state of the conveyor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ConveyorStatus {
    #[default]
    Idle,
    Started,
}

impl ConveyorStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConveyorStatus::Idle => "IDLE",
            ConveyorStatus::Started => "STARTED",
        }
    }
}

impl fmt::Display for ConveyorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ConveyorStatus> for Variant {
    fn from(value: ConveyorStatus) -> Self {
        Variant::String(value.as_str().to_string())
    }
}
