use thiserror::Error;
use tracker_core::TrackerError;

#[derive(Error, Debug)]
pub enum GitLabError {
    #[error("{0}")]
    Transport(#[from] TrackerError),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

impl GitLabError {
    /// True when the request never produced an HTTP answer
    pub fn is_transport(&self) -> bool {
        matches!(self, GitLabError::Transport(_))
    }
}

pub type Result<T> = std::result::Result<T, GitLabError>;

impl From<GitLabError> for TrackerError {
    fn from(err: GitLabError) -> Self {
        match err {
            GitLabError::Transport(e) => e,
            GitLabError::Parse(e) => TrackerError::Parse(e.to_string()),
            GitLabError::Unauthorized => TrackerError::Api {
                status: 401,
                message: "Authentication failed".to_string(),
            },
            GitLabError::Api { status, message } => TrackerError::Api { status, message },
        }
    }
}
