use thiserror::Error;

/// Common errors for all issue tracker adapters.
///
/// Only [`TrackerError::Configuration`] is ever returned from an adapter
/// operation. The other variants travel between the transport, the tracker
/// clients and the adapters, where they are logged and demoted to sentinels.
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl TrackerError {
    /// True for the only error kind that adapters surface to their caller
    pub fn is_configuration(&self) -> bool {
        matches!(self, TrackerError::Configuration(_))
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
