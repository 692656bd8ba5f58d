//! Collaborators injected into every adapter: an event log and a message catalog

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::TrackerConfig;
use crate::error::{Result, TrackerError};

/// Tracing target used for adapter events
pub const LOG_TARGET: &str = "issue_tracker";

/// Severity of an adapter event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
        };
        write!(f, "{}", s)
    }
}

/// Sink for adapter events
pub trait EventLog: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn warning(&self, message: &str) {
        self.log(LogLevel::Warning, message);
    }
}

/// Event log that forwards to `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLog;

impl EventLog for TracingLog {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => tracing::error!(target: LOG_TARGET, "{}", message),
            LogLevel::Warning => tracing::warn!(target: LOG_TARGET, "{}", message),
        }
    }
}

/// Localized user-facing message templates
pub trait MessageCatalog: Send + Sync {
    /// Template for `key`, or `None` when the catalog has no entry
    fn template(&self, key: &str) -> Option<String>;

    /// Render `key` with `args` substituted for its `%s` placeholders.
    /// Unknown keys render as `LOCALIZE: {key}`.
    fn format(&self, key: &str, args: &[&str]) -> String {
        match self.template(key) {
            Some(template) => interpolate(&template, args),
            None => format!("LOCALIZE: {}", key),
        }
    }
}

/// Replace `%s` placeholders in order. Extra placeholders render empty,
/// `%%` renders a literal percent sign.
pub fn interpolate(template: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('s') => {
                chars.next();
                if let Some(arg) = args.next() {
                    out.push_str(arg);
                }
            }
            Some('%') => {
                chars.next();
                out.push('%');
            }
            _ => out.push('%'),
        }
    }
    out
}

/// In-memory catalog with English defaults
#[derive(Debug, Clone)]
pub struct StringCatalog {
    entries: HashMap<String, String>,
}

impl StringCatalog {
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Add or replace a template
    pub fn insert(&mut self, key: impl Into<String>, template: impl Into<String>) {
        self.entries.insert(key.into(), template.into());
    }

    /// Merge `key = "template"` pairs from a TOML document
    pub fn merge_toml(&mut self, content: &str) -> Result<()> {
        let table: HashMap<String, String> = toml::from_str(content)
            .map_err(|e| TrackerError::Parse(format!("message catalog: {}", e)))?;
        self.entries.extend(table);
        Ok(())
    }
}

impl Default for StringCatalog {
    fn default() -> Self {
        let mut catalog = Self::empty();
        catalog.insert(
            "gitlab_bug_created",
            "GitLab issue created (summary: %s) on project: %s",
        );
        catalog.insert(
            "jira_ticket_created",
            "JIRA ticket created (summary: %s) on project: %s",
        );
        catalog.insert("issue_tracker_not_connected", "Issue tracker %s is not connected");
        catalog
    }
}

impl MessageCatalog for StringCatalog {
    fn template(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}

/// Collaborators shared by the adapters of one host
#[derive(Clone)]
pub struct TrackerServices {
    pub log: Arc<dyn EventLog>,
    pub messages: Arc<dyn MessageCatalog>,
}

impl TrackerServices {
    pub fn new(log: Arc<dyn EventLog>, messages: Arc<dyn MessageCatalog>) -> Self {
        Self { log, messages }
    }

    /// Turn a probe result into the connection flag, logging a failure at
    /// ERROR with the redacted connection details
    pub fn record_probe(
        &self,
        name: &str,
        config: &TrackerConfig,
        failure: Option<String>,
    ) -> bool {
        match failure {
            None => true,
            Some(reason) => {
                self.log.error(&format!(
                    "{}: connect [{}] {}",
                    name,
                    config.log_details(),
                    reason
                ));
                false
            }
        }
    }

    /// Log the not-connected condition for `operation`; returns `connected`
    pub fn ensure_connected(&self, name: &str, connected: bool, operation: &str) -> bool {
        if !connected {
            self.log.error(&format!("{}: {}: not connected", name, operation));
        }
        connected
    }
}

impl Default for TrackerServices {
    fn default() -> Self {
        Self {
            log: Arc::new(TracingLog),
            messages: Arc::new(StringCatalog::default()),
        }
    }
}

impl fmt::Debug for TrackerServices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackerServices").finish_non_exhaustive()
    }
}
