//! HTTP-backed collaborator implementations.
//!
//! These talk to the console backend for a given cluster: the API root
//! doubles as the token-validation probe, and `/namespaces` lists the
//! namespaces visible to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use clusterdeck_models::{ClusterId, Credential, NamespaceListResponse};
use reqwest::StatusCode;
use tracing::warn;

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::store::DiskCredentialStore;
use crate::traits::{CookieSessionProbe, NamespaceResolver, TokenValidator};

fn api_base<'a>(config: &'a SessionConfig, cluster: &ClusterId) -> Result<&'a str, SessionError> {
    config
        .api_base_for(cluster)
        .ok_or_else(|| SessionError::Config(format!("unknown cluster: {cluster}")))
}

/// Validates bearer tokens by probing the cluster API root.
#[derive(Clone)]
pub struct HttpTokenValidator {
    client: reqwest::Client,
    config: SessionConfig,
}

impl HttpTokenValidator {
    /// Create a validator over the given configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl TokenValidator for HttpTokenValidator {
    async fn validate(&self, cluster: &ClusterId, token: &str) -> Result<(), SessionError> {
        let base = api_base(&self.config, cluster)?;

        let res = self
            .client
            .get(format!("{base}/"))
            .bearer_auth(token)
            .send()
            .await?;

        match res.status() {
            s if s.is_success() => Ok(()),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(SessionError::InvalidToken("invalid token".into()))
            }
            s => {
                let text = res.text().await.unwrap_or_default();
                Err(SessionError::InvalidToken(format!(
                    "token validation failed ({s}): {text}"
                )))
            }
        }
    }
}

/// Lists namespaces through the console backend.
#[derive(Clone)]
pub struct HttpNamespaceResolver {
    client: reqwest::Client,
    config: SessionConfig,
}

impl HttpNamespaceResolver {
    /// Create a resolver over the given configuration.
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl NamespaceResolver for HttpNamespaceResolver {
    async fn list(
        &self,
        cluster: &ClusterId,
        credential: &Credential,
    ) -> Result<NamespaceListResponse, SessionError> {
        let base = api_base(&self.config, cluster)?;

        let res = self
            .client
            .get(format!("{base}/namespaces"))
            .bearer_auth(&credential.token)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(SessionError::Namespaces(format!(
                "namespace listing failed ({status}): {text}"
            )));
        }

        Ok(res.json::<NamespaceListResponse>().await?)
    }
}

/// Detects federated sessions via the console backend.
///
/// A cookie session is established by the OIDC proxy in front of the
/// backend, so an unauthenticated probe of the API root succeeding means
/// the proxy recognised the caller. `using_oidc_token` is answered from
/// the persisted credential's `oidc` flag.
#[derive(Clone)]
pub struct HttpCookieProbe {
    client: reqwest::Client,
    config: SessionConfig,
    store: Arc<DiskCredentialStore>,
}

impl HttpCookieProbe {
    /// Create a probe sharing the given credential store.
    #[must_use]
    pub fn new(config: SessionConfig, store: Arc<DiskCredentialStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
            store,
        }
    }
}

#[async_trait]
impl CookieSessionProbe for HttpCookieProbe {
    async fn is_authenticated_with_cookie(&self, cluster: &ClusterId) -> bool {
        let Ok(base) = api_base(&self.config, cluster) else {
            warn!(cluster = %cluster, "no API base configured, assuming no cookie session");
            return false;
        };

        match self.client.get(format!("{base}/")).send().await {
            Ok(res) => res.status().is_success(),
            Err(e) => {
                warn!(cluster = %cluster, error = %e, "cookie probe failed");
                false
            }
        }
    }

    fn using_oidc_token(&self) -> bool {
        self.store.load().is_some_and(|c| c.oidc)
    }
}
