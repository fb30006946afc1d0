//! Built-in checks.

pub mod hosts_heartbeat;
pub mod maintenance_mode;
pub mod service_redundancy;
pub mod services_up;

pub use hosts_heartbeat::HostsHeartbeatCheck;
pub use maintenance_mode::ServicesMaintenanceModeCheck;
pub use service_redundancy::ServiceRedundancyCheck;
pub use services_up::ServicesUpCheck;

/// Services that get a [`ServiceRedundancyCheck`] by default.
pub const REDUNDANT_SERVICES: [&str; 2] = ["HIVE", "ZOOKEEPER"];
