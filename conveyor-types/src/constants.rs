pub const NAMESPACE_URI: &str = "urn:intelligentindustry:demo-server";
pub const NAMESPACE_INDEX: u16 = 1;

pub const FOLDER: &str = "IntelligentIndustry";
pub const DEFAULT_INSTANCE_NAME: &str = "Conveyor-1";
pub const DEFAULT_MOTORS: u16 = 4;

pub const RUNNING_SPEED: &str = "RunningSpeed";
pub const MOTORS: &str = "Motors";
pub const STATUS: &str = "Status";

pub const START_METHOD: &str = "conveyor_start";
pub const START_RESULT: &str = "start_result";
pub const START_RESULT_DESCRIPTION: &str = "The result of the start command";
pub const START_SUCCEEDED: &str = "Start succeeded.";

pub const START_EVENT_NAME: &str = "Conveyor Started Event";
pub const START_EVENT_MESSAGE: &str = "Conveyor Started!";
pub const PERIODIC_EVENT_NAME: &str = "Conveyor Event";
pub const PERIODIC_EVENT_MESSAGE: &str = "Conveyor Event";
pub const DEFAULT_EVENT_SEVERITY: u16 = 2;

pub const MAX_RUNNING_SPEED: f64 = 20.0;
