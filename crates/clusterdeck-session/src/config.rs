//! Session configuration.
//!
//! Maps each [`ClusterId`] to its console API base URL and carries the
//! logout redirect target.  The mapping is built from environment
//! variables at startup and injected into the orchestrator and the HTTP
//! collaborators.

use std::collections::HashMap;

use clusterdeck_models::ClusterId;

/// API parameters for a single managed cluster.
#[derive(Debug, Clone)]
pub struct ClusterApiConfig {
    /// Base URL of the console backend for this cluster
    /// (e.g. `http://localhost:8080/api/clusters/default`).
    pub api_base: String,
}

/// Process-wide session configuration.
///
/// Constructed once at startup and shared by the orchestrator and the
/// HTTP collaborators.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Mapping of cluster → API parameters.
    pub clusters: HashMap<ClusterId, ClusterApiConfig>,
    /// Target of the full-page redirect performed on federated logout.
    pub oauth_logout_uri: String,
}

impl SessionConfig {
    /// Build the configuration from environment variables.
    ///
    /// | Variable                        | Default                                        | Description                      |
    /// |---------------------------------|------------------------------------------------|----------------------------------|
    /// | `CLUSTERDECK_OAUTH_LOGOUT_URI`  | `/oauth2/logout`                               | Federated logout redirect target |
    /// | `CLUSTERDECK_DEFAULT_API_BASE`  | `http://localhost:8080/api/clusters/default`   | API base for the default cluster |
    ///
    /// Additional clusters are registered with
    /// [`with_cluster`](Self::with_cluster).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an explicit variable lookup.
    ///
    /// Keeps the defaults testable without touching the process
    /// environment.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let oauth_logout_uri = lookup("CLUSTERDECK_OAUTH_LOGOUT_URI")
            .unwrap_or_else(|| "/oauth2/logout".to_string());

        let mut clusters = HashMap::new();

        // default — always present
        let default_api_base = lookup("CLUSTERDECK_DEFAULT_API_BASE")
            .unwrap_or_else(|| "http://localhost:8080/api/clusters/default".to_string());
        clusters.insert(
            ClusterId::new("default"),
            ClusterApiConfig {
                api_base: default_api_base,
            },
        );

        Self {
            clusters,
            oauth_logout_uri,
        }
    }

    /// Register (or replace) a cluster's API parameters.
    #[must_use]
    pub fn with_cluster(mut self, cluster: ClusterId, api_base: &str) -> Self {
        self.clusters.insert(
            cluster,
            ClusterApiConfig {
                api_base: api_base.to_string(),
            },
        );
        self
    }

    /// Look up the API base URL for the given cluster.
    pub fn api_base_for(&self, cluster: &ClusterId) -> Option<&str> {
        self.clusters.get(cluster).map(|c| c.api_base.as_str())
    }
}
