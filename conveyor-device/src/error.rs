use conveyor_namespace::RegistrationError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Invalid instance name: {0}")]
    InvalidName(String),
    #[error("{0} must be greater than zero")]
    ZeroDuration(&'static str),
    #[error("Pulse speed {0} is outside the range 0..=20")]
    PulseSpeedOutOfRange(f64),
    #[error("Event severity {0} is outside the range 1..=1000")]
    InvalidSeverity(u16),
    #[error("Unable to parse config: {0}")]
    Parse(String),
    #[error("Unable to read config file: {0}")]
    Io(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),
}
