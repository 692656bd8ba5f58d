//! Scripted transport implementing the `Transport` trait
//!
//! Answers requests from a queue instead of making HTTP requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tracker_core::transport::{normalize_host, PendingRequest};
use tracker_core::{Attachment, Method, Result, TrackerError, Transport};

/// One queued answer
#[derive(Debug, Clone)]
pub enum ScriptedReply {
    /// An HTTP answer with a status and raw body
    Respond { status: u16, body: String },
    /// A transport-level failure (refused connection, timeout, ...)
    Fail(String),
}

impl ScriptedReply {
    pub fn json(status: u16, body: serde_json::Value) -> Self {
        ScriptedReply::Respond {
            status,
            body: body.to_string(),
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        ScriptedReply::Respond {
            status,
            body: body.to_string(),
        }
    }

    pub fn fail(message: &str) -> Self {
        ScriptedReply::Fail(message.to_string())
    }
}

/// A single executed request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CallLogEntry {
    /// Timestamp of the call
    pub timestamp: DateTime<Utc>,

    /// HTTP method
    pub method: String,

    /// Full request URL
    pub url: String,

    /// JSON body sent, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,

    /// File name of the uploaded attachment, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,

    /// Response status code (absent when the call failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,

    /// Error message (if call failed)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Shared record of executed requests
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<CallLogEntry>>>,
}

impl CallLog {
    pub fn entries(&self) -> Vec<CallLogEntry> {
        self.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// `METHOD url` for every call, in order
    pub fn requests(&self) -> Vec<String> {
        self.lock()
            .iter()
            .map(|e| format!("{} {}", e.method, e.url))
            .collect()
    }

    fn push(&self, entry: CallLogEntry) {
        self.lock().push(entry);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<CallLogEntry>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// A transport that answers from a queue of scripted replies
pub struct ScriptedTransport {
    host: String,
    replies: VecDeque<ScriptedReply>,
    calls: CallLog,
    pending: Option<PendingRequest>,
    last_status: Option<u16>,
    body: Option<String>,
}

impl ScriptedTransport {
    pub fn new(host: &str) -> Self {
        Self {
            host: normalize_host(host),
            replies: VecDeque::new(),
            calls: CallLog::default(),
            pending: None,
            last_status: None,
            body: None,
        }
    }

    /// Queue the next answer
    pub fn reply(mut self, reply: ScriptedReply) -> Self {
        self.replies.push_back(reply);
        self
    }

    /// Handle on the call log; stays valid after the transport is moved
    pub fn calls(&self) -> CallLog {
        self.calls.clone()
    }
}

impl Transport for ScriptedTransport {
    fn host(&self) -> &str {
        &self.host
    }

    fn open_connection(
        &mut self,
        url: &str,
        method: Method,
        body: Option<serde_json::Value>,
        attachment: Option<Attachment>,
    ) {
        self.pending = Some(PendingRequest {
            url: url.to_string(),
            method,
            body,
            attachment,
        });
    }

    fn execute(&mut self) -> Result<()> {
        let request = self.pending.take().ok_or_else(|| {
            TrackerError::InvalidInput("execute called without an open connection".to_string())
        })?;
        self.last_status = None;
        self.body = None;

        let mut entry = CallLogEntry {
            timestamp: Utc::now(),
            method: request.method.to_string(),
            url: request.url.clone(),
            body: request.body.clone(),
            attachment: request.attachment.as_ref().map(|a| a.file_name.clone()),
            status: None,
            error: None,
        };

        let outcome = match self.replies.pop_front() {
            Some(ScriptedReply::Respond { status, body }) => {
                entry.status = Some(status);
                self.last_status = Some(status);
                self.body = Some(body);
                Ok(())
            }
            Some(ScriptedReply::Fail(message)) => {
                entry.error = Some(message.clone());
                Err(TrackerError::Http(format!(
                    "{} {}: {}",
                    request.method, request.url, message
                )))
            }
            None => {
                let message = "no scripted reply left".to_string();
                entry.error = Some(message.clone());
                Err(TrackerError::Http(format!(
                    "{} {}: {}",
                    request.method, request.url, message
                )))
            }
        };

        self.calls.push(entry);
        outcome
    }

    fn last_status_code(&self) -> Option<u16> {
        self.last_status
    }

    fn response_body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
