//! Session state and the event reducer.
//!
//! [`ConsoleState`] is created once at process start with all flags false
//! and is mutated exclusively by applying [`TransitionEvent`]s, in
//! emission order. `authenticating` is true only between a flow's first
//! emitted event and its terminal event; every terminal event clears it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::event::TransitionEvent;

/// Sentinel default namespace meaning "no specific namespace selected".
pub const ALL_NAMESPACES: &str = "_all";

/// Externally visible session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthState {
    /// Whether the session is authenticated.
    pub authenticated: bool,
    /// True while a flow is in flight.
    pub authenticating: bool,
    /// True iff the current session is cookie/federated-based.
    pub oidc_authenticated: bool,
    /// Set when the session has expired (logout or backend rejection).
    pub session_expired: bool,
    /// Namespace pre-selected as the initial working context.
    pub default_namespace: String,
    /// Last authentication failure, if any; rendered as a banner.
    pub authentication_error: Option<String>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self {
            authenticated: false,
            authenticating: false,
            oidc_authenticated: false,
            session_expired: false,
            default_namespace: ALL_NAMESPACES.to_string(),
            authentication_error: None,
        }
    }
}

/// Per-cluster namespace lists, keyed by cluster name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespacesState {
    /// Cluster name → ordered namespace names.
    pub clusters: HashMap<String, Vec<String>>,
}

/// The state container record: auth plus namespace context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleState {
    /// Session record.
    pub auth: AuthState,
    /// Namespace context.
    pub namespaces: NamespacesState,
}

impl ConsoleState {
    /// Apply one transition event.
    ///
    /// Events must be applied in emission order; `ReceiveNamespaces`
    /// lands before the `SetAuthenticated` that depends on it.
    pub fn apply(&mut self, event: &TransitionEvent) {
        match event {
            TransitionEvent::Authenticating => {
                self.auth.authenticating = true;
                self.auth.authentication_error = None;
            }
            TransitionEvent::AuthenticationError { message } => {
                self.auth.authenticating = false;
                self.auth.authenticated = false;
                self.auth.authentication_error = Some(message.clone());
            }
            TransitionEvent::ReceiveNamespaces {
                cluster,
                namespaces,
            } => {
                self.namespaces
                    .clusters
                    .insert(cluster.clone(), namespaces.clone());
            }
            TransitionEvent::SetAuthenticated {
                authenticated,
                oidc,
                default_namespace,
            } => {
                self.auth.authenticating = false;
                self.auth.authenticated = *authenticated;
                self.auth.oidc_authenticated = *oidc;
                self.auth.default_namespace = default_namespace.clone();
            }
            TransitionEvent::SetSessionExpired { session_expired } => {
                self.auth.session_expired = *session_expired;
            }
        }
    }

    /// Return the auth record to its initial shape, keeping only the
    /// expiry flag. Invoked after logout, once the credential is erased.
    pub fn reset_auth(&mut self) {
        let session_expired = self.auth.session_expired;
        self.auth = AuthState {
            session_expired,
            ..AuthState::default()
        };
    }
}
