pub mod config;
pub mod error;
pub mod models;
pub mod reply;
pub mod services;
pub mod traits;
pub mod transport;

pub use config::{ProxyConfig, TrackerConfig};
pub use error::{Result, TrackerError};
pub use models::*;
pub use reply::{probe_failure, ApiReply, RawReply, SharedTransport};
pub use services::{
    EventLog, LogLevel, MessageCatalog, StringCatalog, TracingLog, TrackerServices,
};
pub use traits::IssueTracker;
pub use transport::{
    Attachment, AuthScheme, Method, RestTransport, Transport, TransportConfig,
};
