//! Disk-backed credential store.
//!
//! Persists the current [`Credential`] as a JSON file under the user's
//! config directory, standing in for the browser local storage the web
//! shell would use. The slot is shared across flows and is not locked;
//! callers must not assume atomicity across flow boundaries.

use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use clusterdeck_models::Credential;
use tracing::{debug, warn};

use crate::error::SessionError;
use crate::traits::CredentialStore;

const APP_DIR: &str = "clusterdeck";
const CREDENTIAL_FILE: &str = "credential.json";

/// File-backed implementation of [`CredentialStore`].
#[derive(Debug, Clone)]
pub struct DiskCredentialStore {
    path: PathBuf,
}

impl DiskCredentialStore {
    /// Create a store rooted at the user's config directory.
    ///
    /// Fails when the platform config directory cannot be determined.
    pub fn new() -> Result<Self, SessionError> {
        let dir = dirs::config_dir()
            .ok_or_else(|| SessionError::Config("could not determine config directory".into()))?
            .join(APP_DIR);
        Ok(Self {
            path: dir.join(CREDENTIAL_FILE),
        })
    }

    /// Create a store over an explicit file path.
    #[must_use]
    pub fn at_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Read the persisted credential, if any.
    ///
    /// An unreadable or unparsable file counts as "no credential".
    #[must_use]
    pub fn load(&self) -> Option<Credential> {
        if !self.path.exists() {
            return None;
        }
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read credential file");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(credential) => Some(credential),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to parse credential file");
                None
            }
        }
    }
}

#[async_trait]
impl CredentialStore for DiskCredentialStore {
    async fn set_auth_token(&self, credential: &Credential) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SessionError::Storage(format!("creating {}: {e}", parent.display())))?;
        }
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&self.path, json)
            .map_err(|e| SessionError::Storage(format!("writing {}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), cluster = %credential.cluster, "credential persisted");
        Ok(())
    }

    async fn unset_auth_token(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "credential erased");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::Storage(format!(
                "removing {}: {e}",
                self.path.display()
            ))),
        }
    }
}
