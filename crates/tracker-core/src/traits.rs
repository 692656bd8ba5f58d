use crate::error::Result;
use crate::models::*;

/// Common trait for all issue tracker adapters
///
/// This trait defines the operations the host application uses for any tracker.
/// Each tracker (GitLab, JIRA, ...) provides its own implementation and the
/// host picks one by configured type.
///
/// Apart from [`IssueTracker::add_issue`] rejecting a missing project, no
/// method reports an error: failures are logged through the adapter's event
/// log and turned into `None`, `false` or a failed [`CreateIssueOutcome`].
pub trait IssueTracker: Send + Sync {
    /// Name the host registered this tracker under
    fn name(&self) -> &str;

    // ========== Connection ==========

    /// Probe the tracker and record whether it answered. Returns the new state.
    fn connect(&mut self) -> bool;

    /// Connection state recorded by the last probe
    fn is_connected(&self) -> bool;

    // ========== Issue Operations ==========

    /// Fetch and normalize an issue
    fn get_issue(&self, issue_id: &str) -> Option<NormalizedIssue>;

    /// True if the issue can be fetched
    fn check_bug_id_existence(&self, issue_id: &str) -> bool {
        self.get_issue(issue_id).is_some()
    }

    /// True if `issue_id` has the shape of an id for this tracker. No I/O.
    fn check_bug_id_syntax(&self, issue_id: &str) -> bool;

    /// Tracker-native status code of the issue
    fn get_issue_status_code(&self, issue_id: &str) -> Option<String> {
        self.get_issue(issue_id).map(|issue| issue.status_code)
    }

    /// Human-readable status of the issue
    fn get_issue_status_verbose(&self, issue_id: &str) -> Option<String> {
        self.get_issue(issue_id).map(|issue| issue.status_verbose)
    }

    /// Summary label of the issue for direct display
    fn get_issue_summary_html(&self, issue_id: &str) -> Option<String> {
        self.get_issue(issue_id).map(|issue| issue.summary_html)
    }

    /// Create an issue in the configured project.
    ///
    /// Returns `Err` only for configuration problems, before any request is made.
    fn add_issue(
        &self,
        summary: &str,
        description: &str,
        opts: &CreateIssueOptions,
    ) -> Result<CreateIssueOutcome>;

    /// Add a note to an issue. Returns `false` when the tracker does not
    /// support notes or the note could not be added.
    fn add_note(&self, issue_id: &str, text: &str, opts: &NoteOptions) -> bool;

    /// True if issues can be created through the API with this configuration
    fn can_create_via_api(&self) -> bool;

    // ========== Presentation ==========

    /// Configuration template for operator documentation
    fn config_template(&self) -> &'static str;

    /// Link to the issue for display next to test executions
    fn view_issue_url(&self, issue_id: &str) -> Option<String>;

    /// Link for creating issues by hand
    fn create_issue_url(&self) -> Option<String>;
}
