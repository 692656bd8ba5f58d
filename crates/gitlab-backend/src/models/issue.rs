use serde::{Deserialize, Serialize};

/// GitLab issue
///
/// Only `iid`, `title` and `state` are required; a body without them is
/// treated as malformed.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GitLabIssue {
    pub id: Option<u64>,
    pub iid: u64,
    pub project_id: Option<u64>,
    pub title: String,
    pub description: Option<String>,
    pub state: String,
    #[serde(default)]
    pub labels: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub closed_at: Option<String>,
    pub web_url: Option<String>,
}

/// Request to create a GitLab issue, sent as query parameters
#[derive(Debug, Clone, Serialize)]
pub struct CreateGitLabIssue {
    pub title: String,
    pub description: String,
    pub labels: String,
}

impl CreateGitLabIssue {
    /// `title=..&description=..&labels=..`, percent-encoded
    pub fn query_string(&self) -> String {
        format!(
            "title={}&description={}&labels={}",
            urlencoding::encode(&self.title),
            urlencoding::encode(&self.description),
            urlencoding::encode(&self.labels)
        )
    }
}

/// Answer of a successful create; only the new IID is needed
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatedGitLabIssue {
    pub iid: u64,
    pub web_url: Option<String>,
}

/// GitLab error body. `message` is a string or an object of field errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GitLabErrorBody {
    pub message: Option<serde_json::Value>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}
