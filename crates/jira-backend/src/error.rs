use thiserror::Error;
use tracker_core::TrackerError;

#[derive(Error, Debug)]
pub enum JiraError {
    #[error("{0}")]
    Transport(#[from] TrackerError),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl JiraError {
    /// True when the request never produced an HTTP answer
    pub fn is_transport(&self) -> bool {
        matches!(self, JiraError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, JiraError>;

impl From<JiraError> for TrackerError {
    fn from(err: JiraError) -> Self {
        match err {
            JiraError::Transport(e) => e,
            JiraError::Parse(e) => TrackerError::Parse(e.to_string()),
            JiraError::Unauthorized => TrackerError::Api {
                status: 401,
                message: "Authentication failed".to_string(),
            },
            JiraError::Api { status, message } => TrackerError::Api { status, message },
        }
    }
}
