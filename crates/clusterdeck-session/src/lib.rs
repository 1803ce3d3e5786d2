//! # Clusterdeck Session
//!
//! Session/authentication orchestrator for the Clusterdeck multi-cluster
//! management console.
//!
//! The crate provides:
//!
//! * [`AuthOrchestrator`] — the three session flows (`authenticate`,
//!   `check_cookie_authentication`, `expire_session`), each emitting an
//!   ordered sequence of [`TransitionEvent`]s.
//! * Collaborator seams ([`TokenValidator`], [`CookieSessionProbe`],
//!   [`NamespaceResolver`], [`CredentialStore`], [`LogoutNavigator`])
//!   with HTTP/disk implementations.
//! * [`EventSink`] implementations: [`ChannelSink`] for channel
//!   consumers and [`StateSink`] for a shared
//!   [`ConsoleState`](clusterdeck_models::ConsoleState).
//! * [`SessionConfig`] — cluster API bases and the logout redirect URI.
//! * [`SessionError`] — unified error type.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use clusterdeck_models::ClusterId;
//! use clusterdeck_session::{
//!     AuthOrchestrator, DiskCredentialStore, HttpCookieProbe, HttpNamespaceResolver,
//!     HttpTokenValidator, SessionConfig, StateSink, TracingNavigator,
//! };
//!
//! # async fn run() -> Result<(), clusterdeck_session::SessionError> {
//! let config = SessionConfig::from_env();
//! let store = Arc::new(DiskCredentialStore::new()?);
//! let sink = StateSink::new();
//!
//! let orchestrator = AuthOrchestrator::new(
//!     Arc::new(HttpTokenValidator::new(config.clone())),
//!     Arc::new(HttpCookieProbe::new(config.clone(), store.clone())),
//!     Arc::new(HttpNamespaceResolver::new(config.clone())),
//!     store,
//!     Arc::new(TracingNavigator),
//!     config,
//!     sink.clone(),
//! );
//!
//! let cluster = ClusterId::new("default");
//! orchestrator.authenticate(&cluster, "my-bearer-token", false).await?;
//!
//! let state = sink.state();
//! println!("authenticated: {}", state.auth.authenticated);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod navigate;
pub mod orchestrator;
pub mod sink;
pub mod store;
pub mod traits;

pub use config::{ClusterApiConfig, SessionConfig};
pub use error::SessionError;
pub use http::{HttpCookieProbe, HttpNamespaceResolver, HttpTokenValidator};
pub use navigate::TracingNavigator;
pub use orchestrator::AuthOrchestrator;
pub use sink::{ChannelSink, EventSink, StateSink};
pub use store::DiskCredentialStore;
pub use traits::{
    CookieSessionProbe, CredentialStore, LogoutNavigator, NamespaceResolver, TokenValidator,
};

// Re-export event/state types for ergonomic usage.
pub use clusterdeck_models::{TransitionEvent, ALL_NAMESPACES};
