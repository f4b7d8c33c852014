pub use conveyor_device as device;
pub use conveyor_namespace as namespace;
pub use conveyor_types as types;
