//! Cluster identifiers.
//!
//! A [`ClusterId`] names one of the target environments the console
//! manages. Authentication and namespace scope are always per-cluster:
//! every flow takes a `ClusterId` and every emitted namespace list is
//! keyed by one.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier for a managed cluster.
///
/// # Examples
///
/// ```
/// use clusterdeck_models::ClusterId;
///
/// let id = ClusterId::new("default");
/// assert_eq!(id.to_string(), "default");
///
/// let id2: ClusterId = "default".into();
/// assert_eq!(id, id2);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClusterId(String);

impl ClusterId {
    /// Create a new `ClusterId` from a string slice.
    pub fn new(id: &str) -> Self {
        Self(id.to_string())
    }

    /// Return the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClusterId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClusterId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl FromStr for ClusterId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}
