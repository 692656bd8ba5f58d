use serde::{Deserialize, Serialize};

/// Issue id reported when issue creation failed at the transport level
pub const FAILED_ISSUE_ID: &str = "-1";

/// Common issue representation across all trackers.
///
/// Built fresh from every fetch; adapters keep no issue state between calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedIssue {
    /// Tracker-native id (GitLab: project-scoped iid, JIRA: issue key)
    pub id: String,
    /// Issue title
    pub summary: String,
    /// Tracker-native status code
    pub status_code: String,
    /// Human-readable status
    pub status_verbose: String,
    /// Whether the status counts as resolved for this tracker
    pub is_resolved: bool,
    /// Identifier label for direct display, e.g. `<b>42 : </b>`
    pub id_html: String,
    /// Status label for direct display
    pub status_html: String,
    /// Summary label for direct display
    pub summary_html: String,
    /// Issue description, when the tracker returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Browser URL of the issue, when the tracker returned one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_url: Option<String>,
}

impl NormalizedIssue {
    /// Identifier label in the form shown next to linked test executions
    pub fn id_label(requested_id: &str) -> String {
        format!("<b>{} : </b>", escape_html(requested_id))
    }
}

/// Result of an `add_issue` call.
///
/// `id` is the new issue id on success, `None` when the tracker rejected
/// the request and [`FAILED_ISSUE_ID`] when the request never completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateIssueOutcome {
    pub status_ok: bool,
    pub id: Option<String>,
    pub msg: String,
}

impl CreateIssueOutcome {
    pub fn created(id: impl Into<String>, msg: impl Into<String>) -> Self {
        Self {
            status_ok: true,
            id: Some(id.into()),
            msg: msg.into(),
        }
    }

    pub fn rejected(msg: impl Into<String>) -> Self {
        Self {
            status_ok: false,
            id: None,
            msg: msg.into(),
        }
    }

    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            status_ok: false,
            id: Some(FAILED_ISSUE_ID.to_string()),
            msg: msg.into(),
        }
    }

    /// True when the request never reached a tracker answer
    pub fn is_transport_failure(&self) -> bool {
        !self.status_ok && self.id.as_deref() == Some(FAILED_ISSUE_ID)
    }
}

/// Optional attributes for a new issue
#[derive(Debug, Clone, Default)]
pub struct CreateIssueOptions {
    /// Labels to apply. Adapters substitute their default when empty.
    pub labels: Vec<String>,
    /// Tracker issue type id (JIRA only)
    pub issue_type: Option<String>,
}

/// Optional attributes for a note added to an issue
#[derive(Debug, Clone, Default)]
pub struct NoteOptions {
    /// Login of the user the note is written on behalf of
    pub reporter: Option<String>,
}

/// A status the tracker reports, with its resolved flag source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDefinition {
    #[serde(deserialize_with = "crate::config::string_or_number")]
    pub code: String,
    pub verbose: String,
}

impl StatusDefinition {
    pub fn new(code: impl Into<String>, verbose: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            verbose: verbose.into(),
        }
    }
}

/// True if `issue_id` is a non-empty run of ASCII digits
pub fn is_numeric_issue_id(issue_id: &str) -> bool {
    !issue_id.is_empty() && issue_id.chars().all(|c| c.is_ascii_digit())
}

/// Escape text for inclusion in the HTML presentation strings
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
