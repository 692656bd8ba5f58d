use serde::{Deserialize, Serialize};

/// Jira issue
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssue {
    /// Internal numeric ID
    pub id: Option<String>,
    /// Issue key (e.g., "PROJ-123")
    pub key: String,
    /// Self URL
    #[serde(rename = "self")]
    pub self_url: Option<String>,
    /// Issue fields
    pub fields: JiraIssueFields,
}

/// Issue fields container
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssueFields {
    /// Issue summary/title
    pub summary: String,
    /// Issue description (wiki markup in API v2)
    pub description: Option<String>,
    /// Issue status
    pub status: JiraStatus,
    /// Labels
    #[serde(default)]
    pub labels: Vec<String>,
}

/// Issue status
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraStatus {
    /// Status ID
    pub id: String,
    /// Status name
    pub name: String,
}

/// Request body for creating an issue
#[derive(Debug, Clone, Serialize)]
pub struct CreateJiraIssue {
    pub fields: CreateJiraIssueFields,
}

/// Fields for creating an issue
#[derive(Debug, Clone, Serialize)]
pub struct CreateJiraIssueFields {
    pub project: ProjectKey,
    pub summary: String,
    pub description: String,
    pub issuetype: IssueTypeId,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
}

/// Project reference by key
#[derive(Debug, Clone, Serialize)]
pub struct ProjectKey {
    pub key: String,
}

/// Issue type reference by ID
#[derive(Debug, Clone, Serialize)]
pub struct IssueTypeId {
    pub id: String,
}

/// Answer of `POST issue`
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedJiraIssue {
    pub id: Option<String>,
    pub key: String,
    #[serde(rename = "self")]
    pub self_url: Option<String>,
}

/// Request body for adding a comment
#[derive(Debug, Clone, Serialize)]
pub struct CreateJiraComment {
    pub body: String,
}
