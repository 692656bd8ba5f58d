//! Blocking HTTP transport shared by the tracker clients.
//!
//! A transport holds a single pending-request slot: callers stage a request
//! with [`Transport::open_connection`], perform it with [`Transport::execute`]
//! and then read the recorded status and body.

use std::fmt;
use std::time::Duration;

use ureq::typestate::WithBody;
use ureq::{Agent, RequestBuilder};

use crate::config::ProxyConfig;
use crate::error::{Result, TrackerError};

/// Global timeout applied to every request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods the trackers need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
        };
        write!(f, "{}", s)
    }
}

/// How the token is presented to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `PRIVATE-TOKEN: {token}` (GitLab)
    PrivateToken,
    /// `Authorization: Bearer {token}`
    Bearer,
}

/// File uploaded as the raw request body
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(file_name: &str, content_type: &str, data: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            data,
        }
    }
}

/// A staged request
#[derive(Debug, Clone)]
pub struct PendingRequest {
    pub url: String,
    pub method: Method,
    pub body: Option<serde_json::Value>,
    pub attachment: Option<Attachment>,
}

/// Single-slot HTTP transport
pub trait Transport: Send {
    /// API base URL, always ending in `/`
    fn host(&self) -> &str;

    /// Stage a request, replacing any request still pending
    fn open_connection(
        &mut self,
        url: &str,
        method: Method,
        body: Option<serde_json::Value>,
        attachment: Option<Attachment>,
    );

    /// Perform the pending request.
    ///
    /// Transport failures return `Err` and clear the recorded body. HTTP
    /// error statuses are not failures; they are recorded like any answer.
    fn execute(&mut self) -> Result<()>;

    /// True when the last answer had a 2xx status
    fn last_request_status(&self) -> bool {
        self.last_status_code()
            .is_some_and(|status| (200..300).contains(&status))
    }

    /// HTTP status of the last answer
    fn last_status_code(&self) -> Option<u16>;

    /// Raw body of the last answer
    fn response_body(&self) -> Option<&str>;
}

/// Transport construction parameters
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub host: String,
    pub token: String,
    pub auth: AuthScheme,
    pub proxy: Option<ProxyConfig>,
    pub timeout: Duration,
}

impl TransportConfig {
    pub fn new(host: &str, token: &str, auth: AuthScheme) -> Self {
        Self {
            host: host.to_string(),
            token: token.to_string(),
            auth,
            proxy: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_proxy(mut self, proxy: Option<ProxyConfig>) -> Self {
        self.proxy = proxy;
        self
    }
}

/// Ensure exactly one trailing slash
pub fn normalize_host(host: &str) -> String {
    format!("{}/", host.trim().trim_end_matches('/'))
}

/// [`Transport`] backed by a `ureq` agent
pub struct RestTransport {
    agent: Agent,
    host: String,
    token: String,
    auth: AuthScheme,
    pending: Option<PendingRequest>,
    last_status: Option<u16>,
    body: Option<String>,
}

impl RestTransport {
    /// Create a transport. Fails when host or token is empty.
    pub fn new(config: TransportConfig) -> Result<Self> {
        let host = config.host.trim();
        let token = config.token.trim();
        if host.is_empty() {
            return Err(TrackerError::Configuration(
                "Missing or empty host (url to API) - unable to continue".to_string(),
            ));
        }
        if token.is_empty() {
            return Err(TrackerError::Configuration(
                "Missing or empty token - unable to continue".to_string(),
            ));
        }

        let mut builder = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false);

        if let Some(proxy) = config.proxy.as_ref().filter(|p| !p.host.trim().is_empty()) {
            let proxy = ureq::Proxy::new(&proxy.to_uri()).map_err(|e| {
                TrackerError::Configuration(format!("Invalid proxy '{}': {}", proxy.host, e))
            })?;
            builder = builder.proxy(Some(proxy));
        }

        let agent: Agent = builder.build().into();

        Ok(Self {
            agent,
            host: normalize_host(host),
            token: token.to_string(),
            auth: config.auth,
            pending: None,
            last_status: None,
            body: None,
        })
    }

    fn authorize<B>(&self, builder: RequestBuilder<B>) -> RequestBuilder<B> {
        let builder = builder.header("Accept", "application/json");
        match self.auth {
            AuthScheme::PrivateToken => builder.header("PRIVATE-TOKEN", &self.token),
            AuthScheme::Bearer => builder.header("Authorization", format!("Bearer {}", self.token)),
        }
    }
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    request: &PendingRequest,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    if let Some(attachment) = &request.attachment {
        return builder
            .header("Content-Type", &attachment.content_type)
            .header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", attachment.file_name),
            )
            .header("X-Atlassian-Token", "no-check")
            .send(&attachment.data[..]);
    }

    match &request.body {
        Some(body) => builder.send_json(body),
        None => builder.send_empty(),
    }
}

impl Transport for RestTransport {
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

        let response = match request.method {
            Method::Get => self.authorize(self.agent.get(&request.url)).call(),
            Method::Post => send_with_body(self.authorize(self.agent.post(&request.url)), &request),
            Method::Put => send_with_body(self.authorize(self.agent.put(&request.url)), &request),
        };

        let mut response = response.map_err(|e| {
            TrackerError::Http(format!("{} {}: {}", request.method, request.url, e))
        })?;
        let status = response.status().as_u16();
        tracing::debug!(method = %request.method, url = %request.url, status, "tracker request");
        let body = response.body_mut().read_to_string().map_err(|e| {
            TrackerError::Http(format!("{} {}: reading body: {}", request.method, request.url, e))
        })?;

        self.last_status = Some(status);
        self.body = Some(body);
        Ok(())
    }

    fn last_status_code(&self) -> Option<u16> {
        self.last_status
    }

    fn response_body(&self) -> Option<&str> {
        self.body.as_deref()
    }
}
