use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracker_core::TrackerConfig;

/// Prefix of environment variables overriding file settings
pub const ENV_PREFIX: &str = "ISSUE_TRACKER_";

/// Tracker variant selected by the `type` key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackerKind {
    GitLab,
    Jira,
}

/// One `[trackers.<name>]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackerEntry {
    #[serde(rename = "type")]
    pub kind: TrackerKind,
    #[serde(flatten)]
    pub config: TrackerConfig,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// `[logging]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default level when `RUST_LOG` is unset
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Host configuration: message overrides, logging and tracker definitions
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct HostConfig {
    /// Message template overrides, keyed by message key
    #[serde(default)]
    pub messages: BTreeMap<String, String>,
    /// TOML file with further message templates
    pub messages_file: Option<PathBuf>,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub trackers: BTreeMap<String, TrackerEntry>,
}

impl HostConfig {
    /// Load configuration from defaults, the config file and the environment.
    ///
    /// An explicit path must exist; otherwise the platform config directory
    /// is searched for `issue-tracker/trackers.toml`.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            if !path.exists() {
                return Err(anyhow!("Config file not found: {}", path.display()));
            }
        }

        let mut figment = Figment::new().merge(Serialized::defaults(HostConfig::default()));
        for path in config_paths(config_path) {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .map_err(|e| anyhow!("Failed to load config: {}", e))
    }

    /// Tracker definition by name
    pub fn tracker(&self, name: &str) -> Result<&TrackerEntry> {
        self.trackers
            .get(name)
            .with_context(|| format!("Tracker '{}' is not defined", name))
    }
}

fn config_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    if let Some(path) = explicit {
        return vec![path.to_path_buf()];
    }
    default_config_path().into_iter().collect()
}

/// Platform config file location, e.g. `~/.config/issue-tracker/trackers.toml`
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "issue-tracker").map(|d| d.config_dir().join("trackers.toml"))
}
