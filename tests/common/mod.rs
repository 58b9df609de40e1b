//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::Value;
use tokio::net::TcpListener;

use predict_proxy::config::ProxyConfig;
use predict_proxy::{HttpServer, Shutdown};

/// What the mock backend answers for a given request body.
pub type Reply = (u16, String, Duration);

type ReplyFn = dyn Fn(&Value) -> Reply + Send + Sync;

/// A generate endpoint that records every JSON body it receives.
#[derive(Clone)]
pub struct MockBackend {
    pub addr: SocketAddr,
    received: Arc<Mutex<Vec<Value>>>,
}

impl MockBackend {
    /// Start a programmable backend on an ephemeral port.
    pub async fn start<F>(reply: F) -> Self
    where
        F: Fn(&Value) -> Reply + Send + Sync + 'static,
    {
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = (received.clone(), Arc::new(reply) as Arc<ReplyFn>);

        let app = Router::new()
            .route("/api/generate", post(generate))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, received }
    }

    /// Start a backend that always answers with a fixed status and body.
    pub async fn fixed(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| (status, body.clone(), Duration::ZERO)).await
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/generate", self.addr)
    }

    /// All request bodies received so far.
    pub fn received(&self) -> Vec<Value> {
        self.received.lock().unwrap().clone()
    }
}

async fn generate(
    State((received, reply)): State<(Arc<Mutex<Vec<Value>>>, Arc<ReplyFn>)>,
    Json(body): Json<Value>,
) -> (StatusCode, String) {
    received.lock().unwrap().push(body.clone());
    let (status, text, delay) = reply(&body);
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
    (StatusCode::from_u16(status).unwrap(), text)
}

/// A running proxy bound to an ephemeral port.
pub struct TestProxy {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self) -> String {
        format!("http://{}/predict", self.addr)
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy in front of `backend_url`, letting the caller tweak config.
pub async fn start_proxy<F>(backend_url: String, configure: F) -> TestProxy
where
    F: FnOnce(&mut ProxyConfig),
{
    let mut config = ProxyConfig::default();
    config.backend.url = backend_url;
    configure(&mut config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy { addr, shutdown }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
