//! Namespace resource wire types.
//!
//! Shape of the payload returned by the console backend's namespace
//! listing endpoint. Only the metadata name is consumed by the session
//! core; the rest of the resource is backend territory.

use serde::{Deserialize, Serialize};

/// Response of the namespace listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceListResponse {
    /// Namespaces visible to the credential, in resolver-defined order.
    pub namespaces: Vec<NamespaceResource>,
}

impl NamespaceListResponse {
    /// Extract the ordered namespace names.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.namespaces
            .iter()
            .map(|ns| ns.metadata.name.clone())
            .collect()
    }
}

/// A single namespace resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceResource {
    /// Standard resource metadata.
    pub metadata: ResourceMetadata,
}

impl NamespaceResource {
    /// Build a resource carrying only a name.
    pub fn named(name: &str) -> Self {
        Self {
            metadata: ResourceMetadata {
                name: name.to_string(),
            },
        }
    }
}

/// Resource metadata; only the name matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceMetadata {
    /// Resource name.
    pub name: String,
}
