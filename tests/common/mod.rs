//! Shared utilities for integration testing: a programmable mock CRM and a
//! relay bound to an ephemeral port.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use deal_relay::config::{ApiToken, RelayConfig};
use deal_relay::{HttpServer, Shutdown};
use serde_json::{json, Value};
use tokio::net::TcpListener;

pub const TEST_TOKEN: &str = "test-token";

/// One request received by the mock CRM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hit {
    pub path: String,
    pub query: String,
}

#[derive(Clone)]
struct MockState {
    responses: Arc<HashMap<String, (u16, Value)>>,
    hits: Arc<Mutex<Vec<Hit>>>,
}

/// Mock CRM answering fixed JSON per path and recording every hit.
pub struct MockCrm {
    pub addr: SocketAddr,
    hits: Arc<Mutex<Vec<Hit>>>,
}

impl MockCrm {
    /// Start a mock answering `(path, status, body)` triples. Unknown paths get 404.
    pub async fn start(routes: Vec<(&str, u16, Value)>) -> Self {
        let responses: HashMap<String, (u16, Value)> = routes
            .into_iter()
            .map(|(path, status, body)| (path.to_string(), (status, body)))
            .collect();
        let hits = Arc::new(Mutex::new(Vec::new()));

        let state = MockState {
            responses: Arc::new(responses),
            hits: hits.clone(),
        };
        let app = Router::new().fallback(mock_handler).with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, hits }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/v1", self.addr)
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.hits.lock().unwrap().clone()
    }

    pub fn hit_paths(&self) -> Vec<String> {
        self.hits().into_iter().map(|hit| hit.path).collect()
    }
}

async fn mock_handler(State(state): State<MockState>, uri: Uri) -> Response {
    state.hits.lock().unwrap().push(Hit {
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
    });

    match state.responses.get(uri.path()) {
        Some((status, body)) => {
            (StatusCode::from_u16(*status).unwrap(), Json(body.clone())).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Unknown path" })),
        )
            .into_response(),
    }
}

/// A relay running on an ephemeral port. Shuts down on drop.
pub struct TestRelay {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestRelay {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a relay with default config pointed at `base_url`.
pub async fn start_relay(base_url: String) -> TestRelay {
    start_relay_with(base_url, |_| {}).await
}

/// Start a relay pointed at `base_url`, letting the test adjust the config.
pub async fn start_relay_with(base_url: String, customize: impl FnOnce(&mut RelayConfig)) -> TestRelay {
    let mut config = RelayConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.base_url = base_url;
    customize(&mut config);

    let server = HttpServer::new(config, ApiToken::new(TEST_TOKEN)).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestRelay { addr, shutdown }
}

/// HTTP client that never goes through a system proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

/// The sales-rep field definition the default config asks for.
pub fn sales_rep_field() -> Value {
    json!({
        "success": true,
        "data": {
            "id": 69,
            "key": "facd9fa577e3e35573573d03b248eb2ce2987eb7",
            "name": "Sales Rep",
            "field_type": "enum",
            "options": [
                { "id": 1, "label": "Alice" },
                { "id": 2, "label": "Bob" }
            ]
        }
    })
}
