//! Implementation of the tracker-core trait for JiraTracker

use tracker_core::{
    CreateIssueOptions, CreateIssueOutcome, IssueTracker, NormalizedIssue, NoteOptions, Result,
    Transport,
};

use crate::convert::{is_issue_key, jira_issue_to_normalized};
use crate::models::{CreateJiraIssue, CreateJiraIssueFields, IssueTypeId, ProjectKey};
use crate::tracker::{CONFIG_TEMPLATE, JiraTracker};

impl<T: Transport> IssueTracker for JiraTracker<T> {
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

        match self.client.get_issue(issue_id) {
            Ok(reply) => reply.into_success().map(|issue| {
                jira_issue_to_normalized(
                    issue,
                    issue_id,
                    &self.resolved,
                    self.config.uriview.as_deref(),
                )
            }),
            Err(e) => {
                self.services
                    .log
                    .warning(&format!("JIRA Ticket ID {} - {}", issue_id, e));
                None
            }
        }
    }

    fn check_bug_id_syntax(&self, issue_id: &str) -> bool {
        is_issue_key(issue_id)
    }

    fn add_issue(
        &self,
        summary: &str,
        description: &str,
        opts: &CreateIssueOptions,
    ) -> Result<CreateIssueOutcome> {
        let project_key = self.config.require_project("add_issue")?;

        if !self.ensure_connected("add_issue") {
            return Ok(CreateIssueOutcome::rejected(
                self.services
                    .messages
                    .format("issue_tracker_not_connected", &[&self.name]),
            ));
        }

        let issue_type = opts
            .issue_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| self.issue_type());
        let request = CreateJiraIssue {
            fields: CreateJiraIssueFields {
                project: ProjectKey {
                    key: project_key.to_string(),
                },
                summary: summary.to_string(),
                description: description.to_string(),
                issuetype: IssueTypeId {
                    id: issue_type.to_string(),
                },
                labels: opts.labels.clone(),
            },
        };

        let outcome = match self.client.create_issue(&request) {
            Ok(created) => CreateIssueOutcome::created(
                created.key,
                self.services
                    .messages
                    .format("jira_ticket_created", &[summary, project_key]),
            ),
            Err(e) if e.is_transport() => {
                let msg = format!("Create JIRA ticket FAILURE => {}", e);
                self.services.log.warning(&msg);
                CreateIssueOutcome::failed(msg)
            }
            Err(e) => {
                CreateIssueOutcome::rejected(format!("add_issue: Failure: JIRA message:\n{}", e))
            }
        };
        Ok(outcome)
    }

    /// Post `text` as a comment. A reporter, when given, prefixes the comment.
    fn add_note(&self, issue_id: &str, text: &str, opts: &NoteOptions) -> bool {
        if !self.ensure_connected("add_note") {
            return false;
        }

        let body = match opts.reporter.as_deref().filter(|r| !r.is_empty()) {
            Some(reporter) => format!("Reporter: {}\n{}", reporter, text),
            None => text.to_string(),
        };

        match self.client.add_comment(issue_id, &body) {
            Ok(()) => true,
            Err(e) if e.is_transport() => {
                self.services
                    .log
                    .warning(&format!("JIRA Ticket ID {} - add_note - {}", issue_id, e));
                false
            }
            Err(_) => false,
        }
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
