use anyhow::{Context, Result};
use gitlab_backend::GitLabTracker;
use jira_backend::JiraTracker;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracker_core::{IssueTracker, StringCatalog, TracingLog, TrackerServices};

use crate::config::{HostConfig, TrackerEntry, TrackerKind};

/// Message catalog with the English defaults, the messages file and the
/// `[messages]` table applied in that order
pub fn message_catalog(config: &HostConfig) -> Result<StringCatalog> {
    let mut catalog = StringCatalog::default();
    if let Some(path) = &config.messages_file {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read messages file {}", path.display()))?;
        catalog.merge_toml(&content)?;
    }
    for (key, template) in &config.messages {
        catalog.insert(key.clone(), template.clone());
    }
    Ok(catalog)
}

/// Services logging through `tracing` with the host's message catalog
pub fn host_services(config: &HostConfig) -> Result<TrackerServices> {
    Ok(TrackerServices::new(
        Arc::new(TracingLog),
        Arc::new(message_catalog(config)?),
    ))
}

/// Build and connect the adapter for one tracker definition.
///
/// Only a configuration error fails; an unreachable tracker yields a
/// disconnected adapter.
pub fn open_tracker(
    name: &str,
    entry: &TrackerEntry,
    services: TrackerServices,
) -> tracker_core::Result<Box<dyn IssueTracker>> {
    let config = entry.config.clone();
    let tracker: Box<dyn IssueTracker> = match entry.kind {
        TrackerKind::GitLab => Box::new(GitLabTracker::new(name, config, services)?),
        TrackerKind::Jira => Box::new(JiraTracker::new(name, config, services)?),
    };
    Ok(tracker)
}

/// Configuration template shown to operators for a tracker variant
pub fn config_template(kind: TrackerKind) -> &'static str {
    match kind {
        TrackerKind::GitLab => gitlab_backend::CONFIG_TEMPLATE,
        TrackerKind::Jira => jira_backend::CONFIG_TEMPLATE,
    }
}

/// Adapters for every configured tracker, by name
pub struct TrackerRegistry {
    trackers: BTreeMap<String, Box<dyn IssueTracker>>,
}

impl TrackerRegistry {
    pub fn from_config(config: &HostConfig) -> Result<Self> {
        let services = host_services(config)?;
        let mut trackers = BTreeMap::new();
        for (name, entry) in &config.trackers {
            let tracker = open_tracker(name, entry, services.clone())
                .with_context(|| format!("Failed to set up tracker '{}'", name))?;
            if !tracker.is_connected() {
                tracing::warn!(tracker = %name, "tracker is not connected");
            }
            trackers.insert(name.clone(), tracker);
        }
        Ok(Self { trackers })
    }

    pub fn get(&self, name: &str) -> Option<&dyn IssueTracker> {
        self.trackers.get(name).map(|t| t.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn IssueTracker + 'static)> {
        self.trackers.get_mut(name).map(|t| t.as_mut())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.trackers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.trackers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trackers.is_empty()
    }
}
