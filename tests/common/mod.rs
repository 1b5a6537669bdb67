#![allow(dead_code)]

use axum::{Router, extract::ConnectInfo, routing::get};
use axum_test::TestServer;
use serde_json::{Value, json};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::Layer;

use shortlink::api::handlers::health_handler;
use shortlink::api::routes::api_routes;
use shortlink::domain::entities::OwnerId;
use shortlink::infrastructure::persistence::{MemoryLinkRepository, MemoryTokenRepository};
use shortlink::state::AppState;

pub const BASE_URL: &str = "http://localhost:3000";
pub const SIGNING_SECRET: &str = "test-signing-secret";

/// Raw bearer tokens seeded for owners `u1` and `u2`.
pub const TOKEN_U1: &str = "token-for-u1";
pub const TOKEN_U2: &str = "token-for-u2";

/// Inserts a fixed peer address, as `into_make_service_with_connect_info` would.
#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// A test server over in-memory stores, plus a handle on the link store.
pub struct TestApp {
    pub server: TestServer,
    pub links: Arc<MemoryLinkRepository>,
    pub tokens: Arc<MemoryTokenRepository>,
    pub state: AppState,
}

pub async fn spawn_app() -> TestApp {
    let links = Arc::new(MemoryLinkRepository::new());
    let tokens = Arc::new(MemoryTokenRepository::new());

    let state = AppState::new(links.clone(), tokens.clone(), BASE_URL, SIGNING_SECRET);

    for (owner, token) in [("u1", TOKEN_U1), ("u2", TOKEN_U2)] {
        state
            .auth_service
            .issue_token(&format!("{owner}-token"), &OwnerId::new(owner), token)
            .await
            .unwrap();
    }

    let app = Router::new()
        .route("/health", get(health_handler))
        .merge(api_routes())
        .layer(MockConnectInfoLayer)
        .with_state(state.clone());

    TestApp {
        server: TestServer::new(app).unwrap(),
        links,
        tokens,
        state,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

impl TestApp {
    /// Shortens `url` as `token`'s owner (or anonymously) and returns the body.
    pub async fn shorten(&self, url: &str, token: Option<&str>) -> Value {
        let mut request = self
            .server
            .post("/shorten")
            .json(&json!({ "original_url": url }));

        if let Some(token) = token {
            request = request.add_header("Authorization", bearer(token));
        }

        let response = request.await;
        response.assert_status(axum::http::StatusCode::CREATED);
        response.json::<Value>()
    }

    pub async fn visit(&self, code: &str) -> axum_test::TestResponse {
        self.server.get(&format!("/{code}")).await
    }
}
