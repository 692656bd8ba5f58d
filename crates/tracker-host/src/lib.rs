//! Host-side wiring for the issue tracker adapters: layered configuration,
//! logging setup and construction of the configured trackers.

pub mod config;
pub mod logging;
pub mod registry;

pub use config::{HostConfig, LogFormat, LoggingConfig, TrackerEntry, TrackerKind};
pub use logging::init_logging;
pub use registry::{config_template, host_services, open_tracker, TrackerRegistry};
