//! Session error types.
//!
//! [`SessionError`] is the single error type returned by every fallible
//! operation in this crate.  Validation and namespace-resolution failures
//! are recovered inside the orchestrator and converted into
//! `AuthenticationError` events; everything else propagates to the caller.

/// Error type for session operations and collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Invalid or missing configuration (e.g. unknown cluster).
    #[error("configuration error: {0}")]
    Config(String),

    /// The cluster rejected the bearer token. The message is already
    /// human-readable; the orchestrator surfaces it verbatim behind an
    /// `Error: ` prefix.
    #[error("{0}")]
    InvalidToken(String),

    /// Namespace listing failed after a successful (or skipped) validation.
    #[error("{0}")]
    Namespaces(String),

    /// Credential persistence or erasure failed.
    #[error("credential storage error: {0}")]
    Storage(String),

    /// HTTP transport failure while talking to a cluster API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization / deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
