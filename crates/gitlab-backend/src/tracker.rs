use tracker_core::{
    probe_failure, AuthScheme, Result, RestTransport, TrackerConfig, TrackerServices, Transport,
    TransportConfig,
};

use crate::client::GitLabClient;

/// Label applied to created issues when the caller gives none
pub const DEFAULT_LABEL: &str = "bug";

/// Configuration template for operator documentation
pub const CONFIG_TEMPLATE: &str = r#"# Template GitLab issue tracker
type = "gitlab"
apikey = "GITLAB API KEY"
uribase = "https://gitlab.example.com/api/v4"
# Optional, defaults to {uribase}/projects/{projectidentifier}/issues
uriview = "https://gitlab.example.com/api/v4/projects/<ID>/issues"
# Project identifier is NEEDED ONLY if you want to create issues.
# You can use the numeric id or the path ("group/project").
projectidentifier = "GITLAB PROJECT IDENTIFIER"
"#;

/// GitLab adapter for the host's generic issue tracker operations.
///
/// Connects at construction by probing `GET /version`. While disconnected,
/// issue operations log an error and return their failure value without
/// touching the network.
pub struct GitLabTracker<T: Transport = RestTransport> {
    pub(crate) name: String,
    pub(crate) config: TrackerConfig,
    pub(crate) client: GitLabClient<T>,
    pub(crate) connected: bool,
    pub(crate) services: TrackerServices,
}

impl GitLabTracker<RestTransport> {
    /// Build the adapter over an HTTP transport and connect.
    ///
    /// Fails with a configuration error when `uribase` or `apikey` is empty.
    /// An unreachable tracker is not an error: the adapter stays disconnected.
    pub fn new(name: &str, config: TrackerConfig, services: TrackerServices) -> Result<Self> {
        config.validate("GitLab")?;
        let transport = RestTransport::new(
            TransportConfig::new(&config.uribase, &config.apikey, AuthScheme::PrivateToken)
                .with_proxy(config.effective_proxy().cloned()),
        )?;
        Self::with_transport(name, config, transport, services)
    }
}

impl<T: Transport> GitLabTracker<T> {
    /// Build the adapter over any transport and connect
    pub fn with_transport(
        name: &str,
        mut config: TrackerConfig,
        transport: T,
        services: TrackerServices,
    ) -> Result<Self> {
        config.validate("GitLab")?;
        config.complete();

        let mut tracker = Self {
            name: name.to_string(),
            config,
            client: GitLabClient::new(transport),
            connected: false,
            services,
        };
        tracker.probe();
        Ok(tracker)
    }

    /// API client, for callers that need raw GitLab access
    pub fn client(&self) -> &GitLabClient<T> {
        &self.client
    }

    /// Completed configuration
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub(crate) fn probe(&mut self) -> bool {
        let failure = probe_failure(self.client.get_version(), "version probe");
        self.connected = self
            .services
            .record_probe(&self.name, &self.config, failure);
        self.connected
    }

    /// Log the not-connected condition for `operation`; true when connected
    pub(crate) fn ensure_connected(&self, operation: &str) -> bool {
        self.services
            .ensure_connected(&self.name, self.connected, operation)
    }
}
