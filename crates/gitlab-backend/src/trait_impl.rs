//! Implementation of the tracker-core trait for GitLabTracker

use tracker_core::{
    is_numeric_issue_id, CreateIssueOptions, CreateIssueOutcome, IssueTracker, NormalizedIssue,
    NoteOptions, Result, Transport,
};

use crate::convert::gitlab_issue_to_normalized;
use crate::models::CreateGitLabIssue;
use crate::tracker::{GitLabTracker, CONFIG_TEMPLATE, DEFAULT_LABEL};

impl<T: Transport> IssueTracker for GitLabTracker<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn connect(&mut self) -> bool {
        self.probe()
    }

    fn is_connected(&self) -> bool {
        self.connected
    }

    fn get_issue(&self, issue_id: &str) -> Option<NormalizedIssue> {
        if !self.ensure_connected("get_issue") {
            return None;
        }
        // A GitLab iid only means something inside its project.
        let Some(project_id) = self.config.project() else {
            self.services.log.error(&format!(
                "{}: get_issue: projectidentifier is not configured",
                self.name
            ));
            return None;
        };

        match self.client.get_issue(project_id, issue_id) {
            Ok(reply) => reply
                .into_success()
                .map(|issue| gitlab_issue_to_normalized(issue, issue_id)),
            Err(e) => {
                self.services
                    .log
                    .warning(&format!("GitLab Issue ID {} - {}", issue_id, e));
                None
            }
        }
    }

    fn check_bug_id_syntax(&self, issue_id: &str) -> bool {
        is_numeric_issue_id(issue_id)
    }

    fn add_issue(
        &self,
        summary: &str,
        description: &str,
        opts: &CreateIssueOptions,
    ) -> Result<CreateIssueOutcome> {
        let project_id = self.config.require_project("add_issue")?;

        if !self.ensure_connected("add_issue") {
            return Ok(CreateIssueOutcome::rejected(
                self.services
                    .messages
                    .format("issue_tracker_not_connected", &[&self.name]),
            ));
        }

        let labels = if opts.labels.is_empty() {
            DEFAULT_LABEL.to_string()
        } else {
            opts.labels.join(",")
        };
        let request = CreateGitLabIssue {
            title: summary.to_string(),
            description: description.to_string(),
            labels,
        };

        let outcome = match self.client.create_issue(project_id, &request) {
            Ok(created) => CreateIssueOutcome::created(
                created.iid.to_string(),
                self.services
                    .messages
                    .format("gitlab_bug_created", &[summary, project_id]),
            ),
            Err(e) if e.is_transport() => {
                let msg = format!("Create GitLab ticket FAILURE => {}", e);
                self.services.log.warning(&msg);
                CreateIssueOutcome::failed(msg)
            }
            Err(e) => {
                CreateIssueOutcome::rejected(format!("add_issue: Failure: GitLab message:\n{}", e))
            }
        };
        Ok(outcome)
    }

    /// Notes are not implemented for GitLab: this adapter never posts to the
    /// notes endpoint and always answers `false`.
    fn add_note(&self, _issue_id: &str, _text: &str, _opts: &NoteOptions) -> bool {
        false
    }

    fn can_create_via_api(&self) -> bool {
        self.config.project().is_some()
    }

    fn config_template(&self) -> &'static str {
        CONFIG_TEMPLATE
    }

    fn view_issue_url(&self, issue_id: &str) -> Option<String> {
        self.config
            .uriview
            .as_ref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), issue_id))
    }

    fn create_issue_url(&self) -> Option<String> {
        self.config.uricreate.clone()
    }
}
