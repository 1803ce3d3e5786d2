//! Session transition events.
//!
//! Each authentication flow (`authenticate`, `check_cookie_authentication`,
//! `expire_session`) emits an ordered sequence of [`TransitionEvent`]
//! values. The state container applies them in emission order; ordering
//! is significant (`ReceiveNamespaces` must land before `SetAuthenticated`
//! so the default-namespace choice has namespace data downstream).

use serde::{Deserialize, Serialize};

/// One step in a session flow, applied in order by the state container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransitionEvent {
    /// A flow has started; the session is in flight.
    Authenticating,
    /// Token validation (or namespace bootstrap) failed.
    AuthenticationError {
        /// Human-readable failure message, suitable for a banner.
        message: String,
    },
    /// The namespaces visible to the credential on one cluster.
    ReceiveNamespaces {
        /// Cluster the listing applies to.
        cluster: String,
        /// Ordered namespace names as returned by the resolver.
        namespaces: Vec<String>,
    },
    /// Terminal outcome of an authentication flow.
    SetAuthenticated {
        /// Whether the session is now authenticated.
        authenticated: bool,
        /// Whether the session is cookie/federated-based.
        oidc: bool,
        /// Namespace pre-selected as the initial working context.
        default_namespace: String,
    },
    /// Session expiry flag update (set on logout, cleared on OIDC login).
    SetSessionExpired {
        /// New value of the expiry flag.
        session_expired: bool,
    },
}

impl TransitionEvent {
    /// Machine-friendly discriminator, used in log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            TransitionEvent::Authenticating => "authenticating",
            TransitionEvent::AuthenticationError { .. } => "authentication_error",
            TransitionEvent::ReceiveNamespaces { .. } => "receive_namespaces",
            TransitionEvent::SetAuthenticated { .. } => "set_authenticated",
            TransitionEvent::SetSessionExpired { .. } => "set_session_expired",
        }
    }
}
