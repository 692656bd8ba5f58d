pub mod client;
mod convert;
pub mod error;
pub mod models;
mod trait_impl;
mod tracker;

#[cfg(test)]
mod client_tests;

pub use client::GitLabClient;
pub use convert::CLOSED_STATE;
pub use error::{GitLabError, Result};
pub use models::*;
pub use tracker::{GitLabTracker, CONFIG_TEMPLATE, DEFAULT_LABEL};

pub use tracker_core::{IssueTracker, TrackerError};
