//! Bearer credential persisted between console sessions.

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterId;

/// The credential backing the current session.
///
/// The token is opaque to the console core: it is never inspected beyond
/// being handed to the collaborators that validate it or authenticate
/// API calls with it.
///
/// * `cluster` – the cluster the token is bound to.
/// * `token`   – raw bearer token value (empty for cookie sessions).
/// * `oidc`    – whether the session was established via the federated
///   (cookie) login path rather than a manually supplied token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Cluster this credential authenticates against.
    pub cluster: ClusterId,
    /// Opaque bearer token.
    pub token: String,
    /// True when the session came from the federated/cookie login path.
    pub oidc: bool,
}

impl Credential {
    /// Create a credential for the given cluster.
    pub fn new(cluster: ClusterId, token: &str, oidc: bool) -> Self {
        Self {
            cluster,
            token: token.to_string(),
            oidc,
        }
    }
}
