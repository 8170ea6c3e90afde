//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use traefik_mapper::config::MapperConfig;
use traefik_mapper::{HttpServer, Shutdown};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "correct-horse";
pub const TOKEN: &str = "test-token";

/// What the mock upstream serves.
#[derive(Clone)]
pub struct MockUpstream {
    pub document: Value,
    pub applications: Value,
    pub failure: Failure,
}

/// Upstream misbehavior to inject.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
#[allow(dead_code)]
pub enum Failure {
    #[default]
    None,
    /// `main.json` answers 500.
    DocumentError,
    /// `main.json` answers only after this delay.
    SlowDocument(Duration),
    /// Login succeeds but the body carries no token.
    LoginWithoutToken,
    /// The application list answers 500 even with a valid token.
    ApplicationsError,
}

impl MockUpstream {
    pub fn new(document: Value, applications: Value) -> Self {
        Self { document, applications, failure: Failure::None }
    }

    #[allow(dead_code)]
    pub fn failing(mut self, failure: Failure) -> Self {
        self.failure = failure;
        self
    }
}

/// A routing document resembling what the upstream generates.
#[allow(dead_code)]
pub fn sample_document() -> Value {
    json!({
        "http": {
            "routers": {
                "coolify-http": {
                    "entrypoints": ["web"],
                    "rule": "Host(`coolify.example.com`)",
                    "service": "coolify-3000",
                    "middlewares": ["redirect-to-https"]
                },
                "app1-secure": {
                    "entrypoints": ["websecure"],
                    "rule": "Host(`app1.example.com`)",
                    "service": "app1-3000",
                    "middlewares": ["redirect-to-non-www", "gzip"],
                    "tls": { "certresolver": "letsencrypt", "domains": { "main": "app1.example.com" } }
                },
                "app1-www": {
                    "entrypoints": ["websecure"],
                    "rule": "Host(`www.app1.example.com`)",
                    "service": "app1-3000",
                    "middlewares": ["redirect-to-non-www"],
                    "tls": { "certresolver": "letsencrypt" }
                },
                "internal-secure": {
                    "entrypoints": ["websecure"],
                    "rule": "Host(`tools.internal.net`)",
                    "service": "internal-8080",
                    "middlewares": []
                }
            },
            "services": {
                "coolify-3000": { "loadbalancer": { "servers": [{ "url": "http://coolify:3000" }] } },
                "app1-3000": { "loadbalancer": { "servers": [{ "url": "http://app1:3000" }] } },
                "internal-8080": { "loadbalancer": { "servers": [{ "url": "http://internal:8080" }] } }
            },
            "middlewares": {
                "redirect-to-https": { "redirectscheme": { "scheme": "https" } },
                "redirect-to-non-www": { "redirectregex": { "regex": "^https?://www\\.(.+)", "replacement": "http://${1}" } },
                "gzip": { "compress": true }
            }
        }
    })
}

/// Start an upstream serving the source document and the management API.
pub async fn start_mock_upstream(mock: MockUpstream) -> SocketAddr {
    let app = Router::new()
        .route("/webhooks/traefik/main.json", get(document))
        .route("/api/v1/login", post(login))
        .route("/api/v1/applications", get(applications))
        .with_state(mock);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

async fn document(State(mock): State<MockUpstream>) -> impl IntoResponse {
    match mock.failure {
        Failure::DocumentError => {
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" })));
        }
        Failure::SlowDocument(delay) => tokio::time::sleep(delay).await,
        _ => {}
    }
    (StatusCode::OK, Json(mock.document))
}

async fn login(State(mock): State<MockUpstream>, Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == ADMIN_EMAIL && body["password"] == ADMIN_PASSWORD {
        if mock.failure == Failure::LoginWithoutToken {
            return (StatusCode::OK, Json(json!({})));
        }
        (StatusCode::OK, Json(json!({ "token": TOKEN })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "message": "Wrong password or email address." })))
    }
}

async fn applications(State(mock): State<MockUpstream>, headers: HeaderMap) -> impl IntoResponse {
    if mock.failure == Failure::ApplicationsError {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "message": "boom" })));
    }
    let expected = format!("Bearer {TOKEN}");
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => {
            (StatusCode::OK, Json(json!({ "applications": mock.applications })))
        }
        _ => (StatusCode::UNAUTHORIZED, Json(json!({}))),
    }
}

/// A config pointing at `upstream`, listening on an ephemeral port.
pub fn config_for(upstream: SocketAddr) -> MapperConfig {
    let mut config = MapperConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_endpoint = Some(format!("http://{upstream}"));
    config.upstream.request_timeout_secs = 5;
    config
}

/// Start the mapper and return its address and shutdown handle.
pub async fn start_mapper(config: MapperConfig) -> (SocketAddr, Shutdown) {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
