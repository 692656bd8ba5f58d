use tracker_core::{
    AuthScheme, Result, RestTransport, StatusDefinition, TrackerConfig, TrackerServices,
    Transport, TransportConfig, probe_failure,
};

use crate::client::JiraClient;
use crate::convert::default_resolved_statuses;

/// Issue type id used when the configuration names none
pub const DEFAULT_ISSUE_TYPE: &str = "1";

/// Configuration template for operator documentation
pub const CONFIG_TEMPLATE: &str = r#"# Template JIRA issue tracker
type = "jira"
apikey = "JIRA PERSONAL ACCESS TOKEN"
uribase = "https://jira.example.com"
# Optional, defaults to {uribase}/browse/
uriview = "https://jira.example.com/browse/"
# Project key is NEEDED ONLY if you want to create issues.
projectidentifier = "JIRA PROJECT KEY"
# Optional issue type id for created issues, defaults to 1 (Bug)
issuetype = "1"

# Optional, defaults to 5 Resolved and 6 Closed
[[resolvedstatuses]]
code = "5"
verbose = "Resolved"

[[resolvedstatuses]]
code = "6"
verbose = "Closed"
"#;

/// JIRA adapter for the host's generic issue tracker operations.
///
/// Same connection rules as the GitLab adapter, probing `GET serverInfo`.
pub struct JiraTracker<T: Transport = RestTransport> {
    pub(crate) name: String,
    pub(crate) config: TrackerConfig,
    pub(crate) client: JiraClient<T>,
    pub(crate) connected: bool,
    pub(crate) resolved: Vec<StatusDefinition>,
    pub(crate) services: TrackerServices,
}

impl JiraTracker<RestTransport> {
    /// Build the adapter over an HTTP transport with bearer authentication and connect
    pub fn new(name: &str, config: TrackerConfig, services: TrackerServices) -> Result<Self> {
        config.validate("JIRA")?;
        let transport = RestTransport::new(
            TransportConfig::new(&api_root(&config.uribase), &config.apikey, AuthScheme::Bearer)
                .with_proxy(config.effective_proxy().cloned()),
        )?;
        Self::with_transport(name, config, transport, services)
    }
}

impl<T: Transport> JiraTracker<T> {
    /// Build the adapter over any transport and connect.
    ///
    /// The transport host must be the REST root, see [`api_root`].
    pub fn with_transport(
        name: &str,
        mut config: TrackerConfig,
        transport: T,
        services: TrackerServices,
    ) -> Result<Self> {
        config.validate("JIRA")?;
        complete(&mut config);

        let resolved = if config.resolvedstatuses.is_empty() {
            default_resolved_statuses()
        } else {
            config.resolvedstatuses.clone()
        };

        let mut tracker = Self {
            name: name.to_string(),
            config,
            client: JiraClient::new(transport),
            connected: false,
            resolved,
            services,
        };
        tracker.probe();
        Ok(tracker)
    }

    pub fn client(&self) -> &JiraClient<T> {
        &self.client
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Statuses counted as resolved
    pub fn resolved_statuses(&self) -> &[StatusDefinition] {
        &self.resolved
    }

    pub(crate) fn issue_type(&self) -> &str {
        self.config
            .issuetype
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_ISSUE_TYPE)
    }

    pub(crate) fn probe(&mut self) -> bool {
        let failure = probe_failure(self.client.get_server_info(), "serverInfo");
        self.connected = self
            .services
            .record_probe(&self.name, &self.config, failure);
        self.connected
    }

    pub(crate) fn ensure_connected(&self, operation: &str) -> bool {
        self.services
            .ensure_connected(&self.name, self.connected, operation)
    }
}

/// REST API root for a JIRA base URI: `{uribase}/rest/api/2/`
pub fn api_root(uribase: &str) -> String {
    format!("{}/rest/api/2/", uribase.trim().trim_end_matches('/'))
}

fn complete(config: &mut TrackerConfig) {
    let base = config.uribase.trim().trim_end_matches('/').to_string();
    if config.uriview.is_none() {
        config.uriview = Some(format!("{}/browse/", base));
    }
    if config.uricreate.is_none() {
        config.uricreate = Some(format!("{}/secure/CreateIssue!default.jspa", base));
    }
}
