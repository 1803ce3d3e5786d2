//! The session/authentication orchestrator.
//!
//! [`AuthOrchestrator`] composes the collaborator seams into three public
//! flows — [`authenticate`](AuthOrchestrator::authenticate),
//! [`check_cookie_authentication`](AuthOrchestrator::check_cookie_authentication)
//! and [`expire_session`](AuthOrchestrator::expire_session) — each
//! producing an ordered sequence of [`TransitionEvent`]s through the
//! injected [`EventSink`].
//!
//! Steps within one flow execute strictly in order, each awaiting the
//! prior collaborator call before the next event or call. There is no
//! fan-out within a flow and no cancellation: invoking a flow while an
//! earlier one is pending lets their event sequences interleave at the
//! sink.

use std::sync::Arc;

use clusterdeck_models::{ClusterId, Credential, TransitionEvent, ALL_NAMESPACES};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::error::SessionError;
use crate::sink::EventSink;
use crate::traits::{
    CookieSessionProbe, CredentialStore, LogoutNavigator, NamespaceResolver, TokenValidator,
};

/// Orchestrates session establishment and expiry for the console.
pub struct AuthOrchestrator<S: EventSink> {
    validator: Arc<dyn TokenValidator>,
    probe: Arc<dyn CookieSessionProbe>,
    resolver: Arc<dyn NamespaceResolver>,
    store: Arc<dyn CredentialStore>,
    navigator: Arc<dyn LogoutNavigator>,
    config: SessionConfig,
    sink: S,
}

impl<S: EventSink> AuthOrchestrator<S> {
    /// Build an orchestrator over an explicit collaborator set.
    pub fn new(
        validator: Arc<dyn TokenValidator>,
        probe: Arc<dyn CookieSessionProbe>,
        resolver: Arc<dyn NamespaceResolver>,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn LogoutNavigator>,
        config: SessionConfig,
        sink: S,
    ) -> Self {
        Self {
            validator,
            probe,
            resolver,
            store,
            navigator,
            config,
            sink,
        }
    }

    fn emit(&self, event: TransitionEvent) {
        debug!(event = event.kind(), "emitting transition event");
        self.sink.emit(event);
    }

    /// Establish a session on `cluster` with the given bearer token.
    ///
    /// Always emits `Authenticating` first. On the token path the token
    /// is validated against the cluster; a rejection is converted into an
    /// `AuthenticationError` event and the flow terminates cleanly, with
    /// no credential side effects and no namespace call. With
    /// `oidc = true` validation is skipped entirely.
    ///
    /// On success the credential is persisted, the visible namespaces are
    /// resolved (`ReceiveNamespaces`), the first namespace — or the
    /// [`ALL_NAMESPACES`] sentinel when none are visible — becomes the
    /// default, and `SetAuthenticated` is emitted. Federated logins
    /// additionally get `SetSessionExpired(false)` to clear any stale
    /// expiry flag.
    ///
    /// A namespace-resolution failure after successful (or skipped)
    /// validation is likewise converted into an `AuthenticationError`
    /// event. Only storage failures surface as `Err`, and even those
    /// emit a terminal `AuthenticationError` first so the in-flight
    /// flag never sticks.
    pub async fn authenticate(
        &self,
        cluster: &ClusterId,
        token: &str,
        oidc: bool,
    ) -> Result<(), SessionError> {
        info!(cluster = %cluster, oidc, "authentication flow started");
        self.emit(TransitionEvent::Authenticating);

        if !oidc {
            if let Err(e) = self.validator.validate(cluster, token).await {
                warn!(cluster = %cluster, error = %e, "token validation failed");
                self.emit(TransitionEvent::AuthenticationError {
                    message: format!("Error: {e}"),
                });
                return Ok(());
            }
        }

        let credential = Credential::new(cluster.clone(), token, oidc);
        if let Err(e) = self.store.set_auth_token(&credential).await {
            warn!(cluster = %cluster, error = %e, "credential persistence failed");
            self.emit(TransitionEvent::AuthenticationError {
                message: format!("Error: {e}"),
            });
            return Err(e);
        }

        let names = match self.resolver.list(cluster, &credential).await {
            Ok(response) => response.names(),
            Err(e) => {
                warn!(cluster = %cluster, error = %e, "namespace resolution failed");
                self.emit(TransitionEvent::AuthenticationError {
                    message: format!("Error: {e}"),
                });
                return Ok(());
            }
        };

        self.emit(TransitionEvent::ReceiveNamespaces {
            cluster: cluster.to_string(),
            namespaces: names.clone(),
        });

        let default_namespace = names
            .first()
            .cloned()
            .unwrap_or_else(|| ALL_NAMESPACES.to_string());

        info!(
            cluster = %cluster,
            oidc,
            default_namespace = %default_namespace,
            "authentication succeeded"
        );
        self.emit(TransitionEvent::SetAuthenticated {
            authenticated: true,
            oidc,
            default_namespace,
        });

        if oidc {
            self.emit(TransitionEvent::SetSessionExpired {
                session_expired: false,
            });
        }

        Ok(())
    }

    /// Resume a federated session from an existing login cookie.
    ///
    /// Emits `Authenticating`, probes for a session cookie, and on a
    /// positive probe delegates to [`authenticate`](Self::authenticate)
    /// with `oidc = true` (which emits its own full sequence, starting
    /// with a second `Authenticating`). A negative probe emits a terminal
    /// `SetAuthenticated { authenticated: false, .. }` so the in-flight
    /// flag never sticks.
    pub async fn check_cookie_authentication(
        &self,
        cluster: &ClusterId,
    ) -> Result<(), SessionError> {
        info!(cluster = %cluster, "cookie authentication check started");
        self.emit(TransitionEvent::Authenticating);

        if self.probe.is_authenticated_with_cookie(cluster).await {
            self.authenticate(cluster, "", true).await
        } else {
            info!(cluster = %cluster, "no cookie session found");
            self.emit(TransitionEvent::SetAuthenticated {
                authenticated: false,
                oidc: false,
                default_namespace: ALL_NAMESPACES.to_string(),
            });
            Ok(())
        }
    }

    /// End the current session.
    ///
    /// Unconditionally erases the persisted credential, performs the
    /// configured logout redirect when the live session is federated, and
    /// emits `SetSessionExpired(true)` regardless of session type. Local
    /// state is cleared even when erasure fails; the storage error is
    /// surfaced afterwards.
    pub async fn expire_session(&self) -> Result<(), SessionError> {
        info!("expiring session");
        let erased = self.store.unset_auth_token().await;

        if self.probe.using_oidc_token() {
            self.navigator.navigate(&self.config.oauth_logout_uri);
        }

        self.emit(TransitionEvent::SetSessionExpired {
            session_expired: true,
        });

        erased
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use clusterdeck_models::{NamespaceListResponse, NamespaceResource};

    use super::*;

    const TOKEN: &str = "abcd";
    const VALIDATION_ERROR: &str = "Validation error";

    #[derive(Default)]
    struct MockValidator {
        fail_with: Option<String>,
        calls: Mutex<Vec<(ClusterId, String)>>,
    }

    impl MockValidator {
        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn calls(&self) -> Vec<(ClusterId, String)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TokenValidator for MockValidator {
        async fn validate(&self, cluster: &ClusterId, token: &str) -> Result<(), SessionError> {
            self.calls
                .lock()
                .unwrap()
                .push((cluster.clone(), token.to_string()));
            match &self.fail_with {
                Some(message) => Err(SessionError::InvalidToken(message.clone())),
                None => Ok(()),
            }
        }
    }

    #[derive(Default)]
    struct MockProbe {
        cookie_present: bool,
        oidc_session: bool,
    }

    #[async_trait]
    impl CookieSessionProbe for MockProbe {
        async fn is_authenticated_with_cookie(&self, _cluster: &ClusterId) -> bool {
            self.cookie_present
        }

        fn using_oidc_token(&self) -> bool {
            self.oidc_session
        }
    }

    #[derive(Default)]
    struct MockResolver {
        namespaces: Vec<String>,
        fail_with: Option<String>,
        calls: Mutex<Vec<ClusterId>>,
    }

    impl MockResolver {
        fn with_namespaces(names: &[&str]) -> Self {
            Self {
                namespaces: names.iter().map(ToString::to_string).collect(),
                ..Self::default()
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                fail_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl NamespaceResolver for MockResolver {
        async fn list(
            &self,
            cluster: &ClusterId,
            _credential: &Credential,
        ) -> Result<NamespaceListResponse, SessionError> {
            self.calls.lock().unwrap().push(cluster.clone());
            match &self.fail_with {
                Some(message) => Err(SessionError::Namespaces(message.clone())),
                None => Ok(NamespaceListResponse {
                    namespaces: self
                        .namespaces
                        .iter()
                        .map(|n| NamespaceResource::named(n))
                        .collect(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct MockStore {
        fail_set_with: Option<String>,
        set_calls: Mutex<Vec<Credential>>,
        unset_calls: AtomicUsize,
    }

    impl MockStore {
        fn failing_set(message: &str) -> Self {
            Self {
                fail_set_with: Some(message.to_string()),
                ..Self::default()
            }
        }

        fn set_calls(&self) -> Vec<Credential> {
            self.set_calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CredentialStore for MockStore {
        async fn set_auth_token(&self, credential: &Credential) -> Result<(), SessionError> {
            self.set_calls.lock().unwrap().push(credential.clone());
            match &self.fail_set_with {
                Some(message) => Err(SessionError::Storage(message.clone())),
                None => Ok(()),
            }
        }

        async fn unset_auth_token(&self) -> Result<(), SessionError> {
            self.unset_calls.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[derive(Default)]
    struct MockNavigator {
        targets: Mutex<Vec<String>>,
    }

    impl MockNavigator {
        fn targets(&self) -> Vec<String> {
            self.targets.lock().unwrap().clone()
        }
    }

    impl LogoutNavigator for MockNavigator {
        fn navigate(&self, uri: &str) {
            self.targets.lock().unwrap().push(uri.to_string());
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        events: Mutex<Vec<TransitionEvent>>,
    }

    impl RecordingSink {
        fn events(&self) -> Vec<TransitionEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn emit(&self, event: TransitionEvent) {
            self.events.lock().unwrap().push(event);
        }
    }

    struct Fixture {
        validator: Arc<MockValidator>,
        probe: Arc<MockProbe>,
        resolver: Arc<MockResolver>,
        store: Arc<MockStore>,
        navigator: Arc<MockNavigator>,
        sink: Arc<RecordingSink>,
    }

    impl Default for Fixture {
        fn default() -> Self {
            Self {
                validator: Arc::new(MockValidator::default()),
                probe: Arc::new(MockProbe::default()),
                resolver: Arc::new(MockResolver::default()),
                store: Arc::new(MockStore::default()),
                navigator: Arc::new(MockNavigator::default()),
                sink: Arc::new(RecordingSink::default()),
            }
        }
    }

    impl Fixture {
        fn orchestrator(&self) -> AuthOrchestrator<Arc<RecordingSink>> {
            AuthOrchestrator::new(
                self.validator.clone(),
                self.probe.clone(),
                self.resolver.clone(),
                self.store.clone(),
                self.navigator.clone(),
                config(),
                self.sink.clone(),
            )
        }
    }

    // Built explicitly so ambient environment variables cannot leak in.
    fn config() -> SessionConfig {
        SessionConfig {
            clusters: std::collections::HashMap::new(),
            oauth_logout_uri: "/oauth2/logout".to_string(),
        }
    }

    fn cluster() -> ClusterId {
        ClusterId::new("default")
    }

    #[tokio::test]
    async fn invalid_token_emits_authenticating_then_error() {
        let fixture = Fixture {
            validator: Arc::new(MockValidator::failing(VALIDATION_ERROR)),
            ..Fixture::default()
        };

        fixture
            .orchestrator()
            .authenticate(&cluster(), TOKEN, false)
            .await
            .unwrap();

        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::AuthenticationError {
                    message: format!("Error: {VALIDATION_ERROR}"),
                },
            ]
        );
        // No credential side effects, no namespace call.
        assert!(fixture.store.set_calls().is_empty());
        assert_eq!(fixture.resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn valid_token_with_no_namespaces_defaults_to_sentinel() {
        let fixture = Fixture::default();

        fixture
            .orchestrator()
            .authenticate(&cluster(), TOKEN, false)
            .await
            .unwrap();

        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::ReceiveNamespaces {
                    cluster: "default".into(),
                    namespaces: vec![],
                },
                TransitionEvent::SetAuthenticated {
                    authenticated: true,
                    oidc: false,
                    default_namespace: ALL_NAMESPACES.into(),
                },
            ]
        );
        assert_eq!(
            fixture.validator.calls(),
            vec![(cluster(), TOKEN.to_string())]
        );
    }

    #[tokio::test]
    async fn first_namespace_becomes_default() {
        let fixture = Fixture {
            resolver: Arc::new(MockResolver::with_namespaces(&["foo", "bar"])),
            ..Fixture::default()
        };

        fixture
            .orchestrator()
            .authenticate(&cluster(), TOKEN, false)
            .await
            .unwrap();

        let events = fixture.sink.events();
        assert_eq!(
            events.last(),
            Some(&TransitionEvent::SetAuthenticated {
                authenticated: true,
                oidc: false,
                default_namespace: "foo".into(),
            })
        );
        assert_eq!(
            events[1],
            TransitionEvent::ReceiveNamespaces {
                cluster: "default".into(),
                namespaces: vec!["foo".into(), "bar".into()],
            }
        );
    }

    #[tokio::test]
    async fn oidc_skips_validation_and_resets_expiry() {
        let fixture = Fixture {
            // Would fail if consulted; the oidc path must never call it.
            validator: Arc::new(MockValidator::failing("must not be called")),
            ..Fixture::default()
        };

        fixture
            .orchestrator()
            .authenticate(&cluster(), "ignored", true)
            .await
            .unwrap();

        assert!(fixture.validator.calls().is_empty());
        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::ReceiveNamespaces {
                    cluster: "default".into(),
                    namespaces: vec![],
                },
                TransitionEvent::SetAuthenticated {
                    authenticated: true,
                    oidc: true,
                    default_namespace: ALL_NAMESPACES.into(),
                },
                TransitionEvent::SetSessionExpired {
                    session_expired: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn successful_paths_persist_the_credential() {
        let fixture = Fixture::default();
        let orchestrator = fixture.orchestrator();

        orchestrator
            .authenticate(&cluster(), TOKEN, false)
            .await
            .unwrap();
        orchestrator
            .authenticate(&cluster(), "", true)
            .await
            .unwrap();

        let stored = fixture.store.set_calls();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0], Credential::new(cluster(), TOKEN, false));
        assert_eq!(stored[1], Credential::new(cluster(), "", true));
    }

    #[tokio::test]
    async fn namespace_failure_becomes_authentication_error() {
        let fixture = Fixture {
            resolver: Arc::new(MockResolver::failing("namespace listing failed")),
            ..Fixture::default()
        };

        fixture
            .orchestrator()
            .authenticate(&cluster(), TOKEN, false)
            .await
            .unwrap();

        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::AuthenticationError {
                    message: "Error: namespace listing failed".into(),
                },
            ]
        );
    }

    #[tokio::test]
    async fn storage_failure_still_ends_the_flow() {
        let fixture = Fixture {
            store: Arc::new(MockStore::failing_set("disk full")),
            ..Fixture::default()
        };

        let result = fixture
            .orchestrator()
            .authenticate(&cluster(), TOKEN, false)
            .await;

        assert!(matches!(result, Err(SessionError::Storage(_))));
        let events = fixture.sink.events();
        assert_eq!(
            events,
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::AuthenticationError {
                    message: "Error: credential storage error: disk full".into(),
                },
            ]
        );

        // The terminal event must clear the in-flight flag downstream.
        let mut state = clusterdeck_models::ConsoleState::default();
        for event in &events {
            state.apply(event);
        }
        assert!(!state.auth.authenticating);
    }

    #[tokio::test]
    async fn cookie_check_with_session_runs_full_oidc_flow() {
        let fixture = Fixture {
            probe: Arc::new(MockProbe {
                cookie_present: true,
                oidc_session: false,
            }),
            ..Fixture::default()
        };

        fixture
            .orchestrator()
            .check_cookie_authentication(&cluster())
            .await
            .unwrap();

        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::Authenticating,
                TransitionEvent::ReceiveNamespaces {
                    cluster: "default".into(),
                    namespaces: vec![],
                },
                TransitionEvent::SetAuthenticated {
                    authenticated: true,
                    oidc: true,
                    default_namespace: ALL_NAMESPACES.into(),
                },
                TransitionEvent::SetSessionExpired {
                    session_expired: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn cookie_check_without_session_ends_unauthenticated() {
        let fixture = Fixture::default();

        fixture
            .orchestrator()
            .check_cookie_authentication(&cluster())
            .await
            .unwrap();

        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::Authenticating,
                TransitionEvent::SetAuthenticated {
                    authenticated: false,
                    oidc: false,
                    default_namespace: ALL_NAMESPACES.into(),
                },
            ]
        );
        assert_eq!(fixture.resolver.call_count(), 0);
    }

    #[tokio::test]
    async fn expire_session_erases_credential_and_emits_expiry() {
        let fixture = Fixture::default();

        fixture.orchestrator().expire_session().await.unwrap();

        assert_eq!(fixture.store.unset_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            fixture.sink.events(),
            vec![TransitionEvent::SetSessionExpired {
                session_expired: true,
            }]
        );
        // Token session: no redirect.
        assert!(fixture.navigator.targets().is_empty());
    }

    #[tokio::test]
    async fn expire_session_redirects_federated_logins() {
        let fixture = Fixture {
            probe: Arc::new(MockProbe {
                cookie_present: false,
                oidc_session: true,
            }),
            ..Fixture::default()
        };

        fixture.orchestrator().expire_session().await.unwrap();

        assert_eq!(fixture.navigator.targets(), vec!["/oauth2/logout"]);
        assert_eq!(
            fixture.sink.events(),
            vec![TransitionEvent::SetSessionExpired {
                session_expired: true,
            }]
        );
    }

    #[tokio::test]
    async fn expire_session_is_idempotent() {
        let fixture = Fixture::default();
        let orchestrator = fixture.orchestrator();

        orchestrator.expire_session().await.unwrap();
        orchestrator.expire_session().await.unwrap();

        assert_eq!(fixture.store.unset_calls.load(Ordering::SeqCst), 2);
        assert_eq!(
            fixture.sink.events(),
            vec![
                TransitionEvent::SetSessionExpired {
                    session_expired: true,
                },
                TransitionEvent::SetSessionExpired {
                    session_expired: true,
                },
            ]
        );
    }

    #[tokio::test]
    async fn state_sink_derives_authenticated_state() {
        let sink = crate::sink::StateSink::new();
        let fixture = Fixture {
            resolver: Arc::new(MockResolver::with_namespaces(&["team-a"])),
            ..Fixture::default()
        };
        let orchestrator = AuthOrchestrator::new(
            fixture.validator.clone(),
            fixture.probe.clone(),
            fixture.resolver.clone(),
            fixture.store.clone(),
            fixture.navigator.clone(),
            config(),
            sink.clone(),
        );

        orchestrator
            .authenticate(&cluster(), TOKEN, false)
            .await
            .unwrap();

        let state = sink.state();
        assert!(state.auth.authenticated);
        assert!(!state.auth.authenticating);
        assert!(!state.auth.oidc_authenticated);
        assert_eq!(state.auth.default_namespace, "team-a");
        assert_eq!(
            state.namespaces.clusters["default"],
            vec!["team-a".to_string()]
        );
    }
}
