use std::fmt;
use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::error::Result;
use crate::transport::{Attachment, Method, Transport};

/// Answer of one tracker call: the HTTP success flag and the decoded body.
///
/// `response` is `None` when the body was empty or did not match `T`.
#[derive(Debug, Clone)]
pub struct ApiReply<T> {
    pub status: bool,
    pub status_code: Option<u16>,
    pub response: Option<T>,
}

impl<T> ApiReply<T> {
    /// The decoded body, only when the call succeeded
    pub fn into_success(self) -> Option<T> {
        if self.status {
            self.response
        } else {
            None
        }
    }
}

/// Undecoded answer of one tracker call
#[derive(Debug, Clone)]
pub struct RawReply {
    pub status: bool,
    pub status_code: Option<u16>,
    pub body: Option<String>,
}

impl RawReply {
    /// Decode the body into `T`, nulling out malformed payloads
    pub fn decode<T: DeserializeOwned>(&self) -> ApiReply<T> {
        let response = self
            .body
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .and_then(|b| serde_json::from_str(b).ok());
        ApiReply {
            status: self.status,
            status_code: self.status_code,
            response,
        }
    }
}

/// Reason a connection probe failed, or `None` when it answered 2xx with a
/// decodable body. `endpoint` names the probed resource in the reason.
pub fn probe_failure<T, E: fmt::Display>(
    result: std::result::Result<ApiReply<T>, E>,
    endpoint: &str,
) -> Option<String> {
    match result {
        Ok(reply) if reply.status && reply.response.is_some() => None,
        Ok(reply) => Some(match reply.status_code {
            Some(status) if !reply.status => format!("{} answered HTTP {}", endpoint, status),
            _ => format!("{} returned no usable body", endpoint),
        }),
        Err(e) => Some(e.to_string()),
    }
}

/// A transport behind a per-instance lock.
///
/// The lock is held from staging the request until the answer has been
/// read, so calls made through one instance never share the pending slot.
pub struct SharedTransport<T: Transport> {
    inner: Mutex<T>,
    host: String,
}

impl<T: Transport> SharedTransport<T> {
    pub fn new(transport: T) -> Self {
        let host = transport.host().to_string();
        Self {
            inner: Mutex::new(transport),
            host,
        }
    }

    /// API base URL, ending in `/`
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Absolute URL for an API path relative to the host
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.host, path.trim_start_matches('/'))
    }

    /// Stage and perform one request
    pub fn exchange(
        &self,
        url: &str,
        method: Method,
        body: Option<serde_json::Value>,
        attachment: Option<Attachment>,
    ) -> Result<RawReply> {
        let mut transport = self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        transport.open_connection(url, method, body, attachment);
        transport.execute()?;
        Ok(RawReply {
            status: transport.last_request_status(),
            status_code: transport.last_status_code(),
            body: transport.response_body().map(|b| b.to_string()),
        })
    }
}
