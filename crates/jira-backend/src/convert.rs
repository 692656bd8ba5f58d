//! Model conversions from Jira types to tracker-core types

use tracker_core::{escape_html, NormalizedIssue, StatusDefinition};

use crate::models::*;

/// Statuses counted as resolved when the configuration names none
pub fn default_resolved_statuses() -> Vec<StatusDefinition> {
    vec![
        StatusDefinition::new("5", "Resolved"),
        StatusDefinition::new("6", "Closed"),
    ]
}

/// Convert a Jira issue to a NormalizedIssue.
///
/// The status id is the code, the status name the verbose form. An issue is
/// resolved when its status id appears in `resolved`.
pub fn jira_issue_to_normalized(
    issue: JiraIssue,
    requested_id: &str,
    resolved: &[StatusDefinition],
    view_base: Option<&str>,
) -> NormalizedIssue {
    let status = issue.fields.status;
    let is_resolved = resolved.iter().any(|s| s.code == status.id);
    let web_url = view_base.map(|base| format!("{}/{}", base.trim_end_matches('/'), issue.key));

    NormalizedIssue {
        id_html: NormalizedIssue::id_label(requested_id),
        status_html: format!("[{}] ", escape_html(&status.name)),
        summary_html: escape_html(&issue.fields.summary),
        id: issue.key,
        summary: issue.fields.summary,
        status_code: status.id,
        status_verbose: status.name,
        is_resolved,
        description: issue.fields.description.filter(|d| !d.is_empty()),
        web_url,
    }
}

/// Join `errorMessages` and `errors` entries of a Jira error body
pub fn jira_error_message(body: &JiraErrorBody) -> Option<String> {
    let mut messages: Vec<String> = body
        .error_messages
        .iter()
        .filter(|m| !m.is_empty())
        .cloned()
        .collect();

    for (field, msg) in &body.errors {
        match msg {
            serde_json::Value::String(s) => messages.push(format!("{}: {}", field, s)),
            other => messages.push(format!("{}: {}", field, other)),
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join("; "))
    }
}

/// True for keys shaped like `PROJ-123`
pub fn is_issue_key(key: &str) -> bool {
    let Some((project, number)) = key.split_once('-') else {
        return false;
    };
    let mut project_chars = project.chars();
    let starts_with_letter = project_chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic());

    starts_with_letter
        && project_chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}
