use std::{path::Path, time::Duration};

use conveyor_types::constants::{
    DEFAULT_EVENT_SEVERITY, DEFAULT_INSTANCE_NAME, DEFAULT_MOTORS, MAX_RUNNING_SPEED,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// How a start command drives the conveyor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    /// Run the triangular speed profile on a detached task; the command returns immediately.
    #[default]
    Ramp,
    /// Run the fixed speed pulse of the device model inline; the command returns once it settled.
    Pulse,
}

/// What happens to a start command while a previous run is still active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapPolicy {
    /// Overlapping runs proceed independently, their speed writes interleave.
    #[default]
    Allow,
    /// The command fails while a run is active.
    Reject,
}

/// Configuration of a simulated conveyor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConveyorConfig {
    pub instance_name: String,
    pub motors: u16,
    pub start_mode: StartMode,
    pub overlap: OverlapPolicy,
    pub ramp_tick_ms: u64,
    pub pulse_speed: f64,
    pub pulse_settle_ms: u64,
    pub notifier_interval_ms: u64,
    pub event_severity: u16,
}

impl Default for ConveyorConfig {
    fn default() -> Self {
        Self {
            instance_name: DEFAULT_INSTANCE_NAME.to_string(),
            motors: DEFAULT_MOTORS,
            start_mode: StartMode::default(),
            overlap: OverlapPolicy::default(),
            ramp_tick_ms: 1000,
            pulse_speed: 10.0,
            pulse_settle_ms: 1000,
            notifier_interval_ms: 2000,
            event_severity: DEFAULT_EVENT_SEVERITY,
        }
    }
}

impl ConveyorConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        conveyor_types::utils::validate_name(&self.instance_name).map_err(ConfigError::InvalidName)?;
        if self.ramp_tick_ms == 0 {
            return Err(ConfigError::ZeroDuration("ramp_tick_ms"));
        }
        if self.pulse_settle_ms == 0 {
            return Err(ConfigError::ZeroDuration("pulse_settle_ms"));
        }
        if self.notifier_interval_ms == 0 {
            return Err(ConfigError::ZeroDuration("notifier_interval_ms"));
        }
        if !(0.0..=MAX_RUNNING_SPEED).contains(&self.pulse_speed) {
            return Err(ConfigError::PulseSpeedOutOfRange(self.pulse_speed));
        }
        if !(1..=1000).contains(&self.event_severity) {
            return Err(ConfigError::InvalidSeverity(self.event_severity));
        }
        Ok(())
    }

    pub fn ramp_tick(&self) -> Duration {
        Duration::from_millis(self.ramp_tick_ms)
    }

    pub fn pulse_settle(&self) -> Duration {
        Duration::from_millis(self.pulse_settle_ms)
    }

    pub fn notifier_interval(&self) -> Duration {
        Duration::from_millis(self.notifier_interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ConveyorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.motors, 4);
        assert_eq!(config.ramp_tick(), Duration::from_secs(1));
        assert_eq!(config.notifier_interval(), Duration::from_secs(2));
        assert_eq!(config.start_mode, StartMode::Ramp);
        assert_eq!(config.overlap, OverlapPolicy::Allow);
    }

    #[test]
    fn test_partial_json() {
        let config = ConveyorConfig::from_json_str(
            r#"{ "instance_name": "Conveyor-2", "start_mode": "pulse", "overlap": "reject" }"#,
        )
        .unwrap();
        assert_eq!(config.instance_name, "Conveyor-2");
        assert_eq!(config.start_mode, StartMode::Pulse);
        assert_eq!(config.overlap, OverlapPolicy::Reject);
        assert_eq!(config.motors, 4);
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            ConveyorConfig::from_json_str(r#"{ "speed": 1 }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConveyorConfig::from_json_str(r#"{ "instance_name": "a/b" }"#),
            Err(ConfigError::InvalidName(_))
        ));
    }

    #[test]
    fn test_validate_ranges() {
        let mut config = ConveyorConfig::default();
        config.ramp_tick_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroDuration("ramp_tick_ms")));

        let mut config = ConveyorConfig::default();
        config.pulse_speed = 21.0;
        assert_eq!(config.validate(), Err(ConfigError::PulseSpeedOutOfRange(21.0)));

        let mut config = ConveyorConfig::default();
        config.event_severity = 0;
        assert_eq!(config.validate(), Err(ConfigError::InvalidSeverity(0)));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            ConveyorConfig::from_json_file("/definitely/not/here.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
