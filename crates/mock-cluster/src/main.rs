//! Mock cluster API for local development and integration testing.
//!
//! Serves the two endpoints the session collaborators consume:
//!
//! 1. `GET /` — authentication probe: succeeds with a valid bearer token
//!    or a session cookie, 401 otherwise.
//! 2. `GET /namespaces` — lists the configured namespaces for an
//!    authenticated caller.
//!
//! A fixed development token and a fixed cookie stand in for the real
//! token review and OIDC proxy.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use axum::Router;
use clusterdeck_models::{NamespaceListResponse, NamespaceResource};
use serde_json::json;
use tracing::info;

/// Cookie value accepted as a federated session.
const SESSION_COOKIE: &str = "clusterdeck_session=valid";

/// State shared across handlers.
struct AppState {
    /// The one bearer token this mock accepts.
    token: String,
    /// Namespaces returned to authenticated callers, in order.
    namespaces: Vec<String>,
}

impl AppState {
    fn from_env() -> Self {
        let token =
            std::env::var("MOCK_CLUSTER_TOKEN").unwrap_or_else(|_| "dev-token".to_string());
        let namespaces = std::env::var("MOCK_CLUSTER_NAMESPACES")
            .unwrap_or_else(|_| "default,kube-system".to_string())
            .split(',')
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        Self { token, namespaces }
    }

    fn authorizes(&self, headers: &HeaderMap) -> bool {
        let bearer_ok = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .is_some_and(|t| t == self.token);

        let cookie_ok = headers
            .get(header::COOKIE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|c| c.split(';').any(|part| part.trim() == SESSION_COOKIE));

        bearer_ok || cookie_ok
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid bearer token" })),
    )
        .into_response()
}

/// `GET /` — bearer/cookie authentication probe.
async fn probe(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if state.authorizes(&headers) {
        StatusCode::NO_CONTENT.into_response()
    } else {
        unauthorized()
    }
}

/// `GET /namespaces` — namespace listing for authenticated callers.
async fn namespaces(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    if !state.authorizes(&headers) {
        return unauthorized();
    }

    let list = NamespaceListResponse {
        namespaces: state
            .namespaces
            .iter()
            .map(|n| NamespaceResource::named(n))
            .collect(),
    };
    Json(list).into_response()
}

fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(probe))
        .route("/namespaces", get(namespaces))
        .with_state(state)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let listen_port: u16 = std::env::var("MOCK_CLUSTER_PORT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(8081);

    let state = Arc::new(AppState::from_env());
    info!(
        namespaces = state.namespaces.len(),
        "mock cluster configured (use MOCK_CLUSTER_TOKEN / MOCK_CLUSTER_NAMESPACES to override)"
    );

    let addr = format!("0.0.0.0:{listen_port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind listener");

    info!(address = %addr, "mock cluster listening");
    axum::serve(listener, app(state)).await.expect("server error");
}

#[cfg(test)]
mod tests {
    use axum_test::TestServer;

    use super::*;

    fn server() -> TestServer {
        let state = Arc::new(AppState {
            token: "dev-token".into(),
            namespaces: vec!["default".into(), "kube-system".into()],
        });
        TestServer::new(app(state)).expect("test server")
    }

    #[tokio::test]
    async fn probe_accepts_valid_bearer() {
        let server = server();
        let res = server
            .get("/")
            .add_header("authorization", "Bearer dev-token")
            .await;
        res.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn probe_rejects_bad_bearer() {
        let server = server();
        let res = server
            .get("/")
            .add_header("authorization", "Bearer wrong")
            .await;
        res.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn probe_accepts_session_cookie() {
        let server = server();
        let res = server
            .get("/")
            .add_header("cookie", "other=1; clusterdeck_session=valid")
            .await;
        res.assert_status(StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn namespaces_require_authentication() {
        let server = server();
        let res = server.get("/namespaces").await;
        res.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn namespaces_listed_in_configured_order() {
        let server = server();
        let res = server
            .get("/namespaces")
            .add_header("authorization", "Bearer dev-token")
            .await;
        res.assert_status_ok();

        let list: NamespaceListResponse = res.json();
        assert_eq!(list.names(), vec!["default", "kube-system"]);
    }
}
