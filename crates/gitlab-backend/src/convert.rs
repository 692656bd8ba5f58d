//! Model conversions from GitLab types to tracker-core types

use tracker_core::{escape_html, NormalizedIssue};

use crate::models::*;

/// GitLab state counted as resolved
pub const CLOSED_STATE: &str = "closed";

/// Convert a GitLab issue to a NormalizedIssue.
///
/// `requested_id` is the id the caller asked for; it feeds the id label.
/// GitLab has no separate status code, so the raw `state` fills both the
/// code and the verbose status.
pub fn gitlab_issue_to_normalized(issue: GitLabIssue, requested_id: &str) -> NormalizedIssue {
    let is_resolved = issue.state == CLOSED_STATE;
    NormalizedIssue {
        id: issue.iid.to_string(),
        summary_html: escape_html(&issue.title),
        status_html: escape_html(&issue.state),
        id_html: NormalizedIssue::id_label(requested_id),
        summary: issue.title,
        status_code: issue.state.clone(),
        status_verbose: issue.state,
        is_resolved,
        description: issue.description.filter(|d| !d.is_empty()),
        web_url: issue.web_url,
    }
}

/// Extract a readable message from a GitLab error body.
///
/// GitLab can return `{"message": "..."}`, `{"message": {"field": ["..."]}}`,
/// `{"error": "..."}` or `{"error_description": "..."}`.
pub fn gitlab_error_message(body: &GitLabErrorBody) -> Option<String> {
    if let Some(message) = &body.message {
        if let Some(text) = flatten_message(message) {
            return Some(text);
        }
    }
    body.error
        .clone()
        .or_else(|| body.error_description.clone())
        .filter(|m| !m.is_empty())
}

fn flatten_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(flatten_message).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(", "))
            }
        }
        serde_json::Value::Object(fields) => {
            let parts: Vec<String> = fields
                .iter()
                .filter_map(|(field, errors)| {
                    flatten_message(errors).map(|e| format!("{}: {}", field, e))
                })
                .collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join("; "))
            }
        }
        _ => None,
    }
}
