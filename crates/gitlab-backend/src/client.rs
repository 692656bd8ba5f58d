use tracker_core::{ApiReply, Method, RawReply, RestTransport, SharedTransport, Transport};

use crate::convert::gitlab_error_message;
use crate::error::{GitLabError, Result};
use crate::models::*;

/// GitLab REST API client
///
/// Thin endpoint layer over a [`Transport`]: builds the URL, performs one
/// request and decodes the answer. Connection state and logging live in
/// [`crate::GitLabTracker`].
pub struct GitLabClient<T: Transport = RestTransport> {
    transport: SharedTransport<T>,
}

impl<T: Transport> GitLabClient<T> {
    /// Wrap a transport whose host is the API root, e.g. `https://gitlab.com/api/v4/`
    pub fn new(transport: T) -> Self {
        Self {
            transport: SharedTransport::new(transport),
        }
    }

    /// API root, ending in `/`
    pub fn host(&self) -> &str {
        self.transport.host()
    }

    /// Build a project-scoped URL. `project_id` can be a numeric ID or a path
    /// like `group/project`.
    fn project_url(&self, project_id: &str, path: &str) -> String {
        self.transport.url(&format!(
            "projects/{}{}",
            urlencoding::encode(project_id),
            path
        ))
    }

    /// Check the reply status and return an error if not successful
    fn check_reply(&self, reply: RawReply) -> Result<RawReply> {
        if reply.status {
            return Ok(reply);
        }

        let status = reply.status_code.unwrap_or(0);
        if status == 401 {
            return Err(GitLabError::Unauthorized);
        }

        let body = reply.body.unwrap_or_default();
        let message = match serde_json::from_str::<GitLabErrorBody>(&body) {
            Ok(error_body) => gitlab_error_message(&error_body),
            Err(_) => None,
        }
        .unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("HTTP {}", status)
            } else {
                body
            }
        });

        Err(GitLabError::Api { status, message })
    }

    // ==================== Instance Operations ====================

    /// Get the version of the GitLab installation. Used as connection probe.
    pub fn get_version(&self) -> Result<ApiReply<GitLabVersion>> {
        let url = self.transport.url("version");
        let reply = self.transport.exchange(&url, Method::Get, None, None)?;
        Ok(reply.decode())
    }

    // ==================== Issue Operations ====================

    /// Get an issue by IID (project-scoped number).
    ///
    /// Non-success statuses are returned in the reply, not as errors.
    pub fn get_issue(&self, project_id: &str, iid: &str) -> Result<ApiReply<GitLabIssue>> {
        let url = self.project_url(
            project_id,
            &format!("/issues/{}", urlencoding::encode(iid)),
        );
        let reply = self.transport.exchange(&url, Method::Get, None, None)?;
        Ok(reply.decode())
    }

    /// Create a new issue. Attributes travel as query parameters.
    pub fn create_issue(
        &self,
        project_id: &str,
        issue: &CreateGitLabIssue,
    ) -> Result<CreatedGitLabIssue> {
        let url = format!(
            "{}?{}",
            self.project_url(project_id, "/issues"),
            issue.query_string()
        );

        let reply = self.transport.exchange(&url, Method::Post, None, None)?;
        let reply = self.check_reply(reply)?;
        let created: CreatedGitLabIssue =
            serde_json::from_str(reply.body.as_deref().unwrap_or(""))?;
        Ok(created)
    }
}
