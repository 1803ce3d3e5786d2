//! Collaborator seams consumed by the orchestrator.
//!
//! Every external dependency of the session flows — token validation,
//! cookie probing, namespace listing, credential persistence and the
//! logout redirect — sits behind one of these traits and is injected at
//! construction.  Tests substitute recording fakes; production wiring
//! uses the HTTP/disk implementations in [`crate::http`] and
//! [`crate::store`].

use async_trait::async_trait;
use clusterdeck_models::{ClusterId, Credential, NamespaceListResponse};

use crate::error::SessionError;

/// Checks a bearer token against a cluster API.
#[async_trait]
pub trait TokenValidator: Send + Sync {
    /// Validate the token for the given cluster.
    ///
    /// Fails with a human-readable message when the token is rejected or
    /// the cluster is unreachable for validation.
    async fn validate(&self, cluster: &ClusterId, token: &str) -> Result<(), SessionError>;
}

/// Detects federated (cookie-based) sessions.
#[async_trait]
pub trait CookieSessionProbe: Send + Sync {
    /// Whether a valid session cookie exists for the cluster.
    ///
    /// Probe failures count as "no session"; this is a check, not an
    /// authentication step.
    async fn is_authenticated_with_cookie(&self, cluster: &ClusterId) -> bool;

    /// Whether the *current* live session was established via the
    /// federated/cookie path. Non-suspending.
    fn using_oidc_token(&self) -> bool;
}

/// Lists the namespaces visible to a credential on a cluster.
#[async_trait]
pub trait NamespaceResolver: Send + Sync {
    /// List namespaces; order is resolver-defined and significant
    /// (the first entry becomes the default working namespace).
    async fn list(
        &self,
        cluster: &ClusterId,
        credential: &Credential,
    ) -> Result<NamespaceListResponse, SessionError>;
}

/// Persists and erases the current bearer credential.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Persist the credential as the current session's.
    async fn set_auth_token(&self, credential: &Credential) -> Result<(), SessionError>;

    /// Erase the persisted credential. Erasing an already-empty store
    /// succeeds.
    async fn unset_auth_token(&self) -> Result<(), SessionError>;
}

/// Seam for the full-page logout redirect.
///
/// Browser navigation is a terminal side effect in a web shell; keeping
/// it behind a trait keeps the orchestrator testable and portable.
pub trait LogoutNavigator: Send + Sync {
    /// Navigate the user agent to the given URI.
    fn navigate(&self, uri: &str);
}
