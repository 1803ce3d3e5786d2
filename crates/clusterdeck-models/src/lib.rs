#![deny(missing_docs)]

//! # Clusterdeck Models
//!
//! Core data types for the Clusterdeck multi-cluster management console.
//!
//! ## Session state
//!
//! ```text
//! ConsoleState
//! ├── AuthState          (authenticated / authenticating / oidc / expiry)
//! └── NamespacesState    (per-cluster namespace lists)
//! ```
//!
//! The state is never mutated directly.  Session flows emit an ordered
//! sequence of [`TransitionEvent`] values and the state container applies
//! them, in emission order, via [`ConsoleState::apply`].
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`cluster`] | Cluster identifiers (`ClusterId`) |
//! | [`credential`] | Bearer credential persisted between sessions |
//! | [`event`] | Session transition events |
//! | [`namespace`] | Namespace resource wire types |
//! | [`state`] | Auth/namespace state and the event reducer |

pub mod cluster;
pub mod credential;
pub mod event;
pub mod namespace;
pub mod state;

// Re-export all public types at crate root for convenience.
// Downstream crates can use `clusterdeck_models::ClusterId` directly.
pub use cluster::*;
pub use credential::*;
pub use event::*;
pub use namespace::*;
pub use state::*;
