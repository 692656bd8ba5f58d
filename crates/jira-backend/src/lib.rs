pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;
pub mod tracker;


pub use client::JiraClient;
pub use convert::{default_resolved_statuses, is_issue_key};
pub use error::{JiraError, Result};
pub use models::*;
pub use tracker::{api_root, JiraTracker, CONFIG_TEMPLATE, DEFAULT_ISSUE_TYPE};

// Re-export tracker-core types for convenience
pub use tracker_core::{IssueTracker, TrackerError};
