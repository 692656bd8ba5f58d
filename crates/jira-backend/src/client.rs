use tracker_core::{ApiReply, Method, RawReply, RestTransport, SharedTransport, Transport};

use crate::convert::jira_error_message;
use crate::error::{JiraError, Result};
use crate::models::*;

/// Jira REST API v2 client
///
/// The transport host is the API root, `{uribase}/rest/api/2/`.
pub struct JiraClient<T: Transport = RestTransport> {
    transport: SharedTransport<T>,
}

impl<T: Transport> JiraClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: SharedTransport::new(transport),
        }
    }

    /// API root, ending in `/`
    pub fn host(&self) -> &str {
        self.transport.host()
    }

    fn issue_url(&self, key: &str, path: &str) -> String {
        self.transport
            .url(&format!("issue/{}{}", urlencoding::encode(key), path))
    }

    /// Check reply status and return error if not successful
    fn check_reply(&self, reply: RawReply) -> Result<RawReply> {
        if reply.status {
            return Ok(reply);
        }

        let status = reply.status_code.unwrap_or(0);
        if status == 401 {
            return Err(JiraError::Unauthorized);
        }

        let body = reply.body.unwrap_or_default();
        let message = serde_json::from_str::<JiraErrorBody>(&body)
            .ok()
            .and_then(|error_body| jira_error_message(&error_body))
            .unwrap_or_else(|| {
                if body.trim().is_empty() {
                    format!("HTTP {}", status)
                } else {
                    body
                }
            });

        Err(JiraError::Api { status, message })
    }

    /// Get server information. Used as connection probe.
    pub fn get_server_info(&self) -> Result<ApiReply<JiraServerInfo>> {
        let url = self.transport.url("serverInfo");
        let reply = self.transport.exchange(&url, Method::Get, None, None)?;
        Ok(reply.decode())
    }

    /// Get an issue by key.
    ///
    /// Non-success statuses are returned in the reply, not as errors.
    pub fn get_issue(&self, key: &str) -> Result<ApiReply<JiraIssue>> {
        let url = self.issue_url(key, "");
        let reply = self.transport.exchange(&url, Method::Get, None, None)?;
        Ok(reply.decode())
    }

    /// Create a new issue
    pub fn create_issue(&self, issue: &CreateJiraIssue) -> Result<CreatedJiraIssue> {
        let url = self.transport.url("issue");
        let body = serde_json::to_value(issue)?;

        let reply = self.transport.exchange(&url, Method::Post, Some(body), None)?;
        let reply = self.check_reply(reply)?;
        let created: CreatedJiraIssue = serde_json::from_str(reply.body.as_deref().unwrap_or(""))?;
        Ok(created)
    }

    /// Add a comment to an issue. The comment body is not decoded.
    pub fn add_comment(&self, key: &str, body: &str) -> Result<()> {
        let url = self.issue_url(key, "/comment");
        let comment = serde_json::to_value(CreateJiraComment {
            body: body.to_string(),
        })?;

        let reply = self
            .transport
            .exchange(&url, Method::Post, Some(comment), None)?;
        self.check_reply(reply)?;
        Ok(())
    }
}
