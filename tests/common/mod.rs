//! Mock Discord webhook for integration tests.
//!
//! Binds an ephemeral port, records every request it receives and
//! answers with a fixed status (optionally after a delay).

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

struct MockState {
    status: StatusCode,
    delay: Duration,
    requests: Mutex<Vec<RecordedRequest>>,
}

pub struct MockWebhook {
    pub addr: SocketAddr,
    state: Arc<MockState>,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockWebhook {
    pub async fn start(status: StatusCode) -> Self {
        Self::start_with_delay(status, Duration::ZERO).await
    }

    pub async fn start_with_delay(status: StatusCode, delay: Duration) -> Self {
        let state = Arc::new(MockState {
            status,
            delay,
            requests: Mutex::new(Vec::new()),
        });

        let router = Router::new()
            .route("/api/webhooks/{id}/{token}", post(record))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        tokio::spawn(async move {
            axum::serve(listener, router)
                .with_graceful_shutdown(async {
                    let _ = shutdown_rx.await;
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            state,
            shutdown: Some(shutdown_tx),
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}/api/webhooks/1234/secret-token", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for MockWebhook {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

async fn record(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    body: Bytes,
) -> StatusCode {
    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state
        .requests
        .lock()
        .unwrap()
        .push(RecordedRequest { content_type, body });

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }
    state.status
}

/// Alert payload in the shape Splunk writes to stdin.
pub fn alert_json(webhook_url: &str, field_names: &str) -> String {
    serde_json::json!({
        "app": "search",
        "owner": "admin",
        "sid": "scheduler__admin__search__RMD5a1b2c3_at_1700000000_1",
        "search_name": "High CPU",
        "results_link": "http://x",
        "server_host": "h1",
        "result": {"cpu": "99%", "mem": "10%"},
        "configuration": {"webhook_url": webhook_url, "field_names": field_names}
    })
    .to_string()
}
