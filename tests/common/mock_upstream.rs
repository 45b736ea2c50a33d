// Mock upstream server for testing
#![allow(dead_code)]

use axum::{
    Router,
    body::to_bytes,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// A request as the mock saw it.
#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub headers: HeaderMap,
    pub body: String,
}

impl ReceivedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

struct MockState {
    status: StatusCode,
    content_type: &'static str,
    body: String,
    received: Mutex<Vec<ReceivedRequest>>,
}

/// Answers every request with one canned response and records what it got.
pub struct MockUpstream {
    pub base_url: String,
    state: Arc<MockState>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl MockUpstream {
    pub async fn json(status: StatusCode, body: Value) -> Self {
        Self::start(status, "application/json", body.to_string()).await
    }

    pub async fn text(status: StatusCode, body: &str) -> Self {
        Self::start(status, "text/plain", body.to_string()).await
    }

    async fn start(status: StatusCode, content_type: &'static str, body: String) -> Self {
        let state = Arc::new(MockState {
            status,
            content_type,
            body,
            received: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(record_and_reply)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            if let Err(e) = server.await {
                eprintln!("Mock upstream error: {}", e);
            }
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub fn received(&self) -> Vec<ReceivedRequest> {
        self.state.received.lock().unwrap().clone()
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn record_and_reply(State(state): State<Arc<MockState>>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    state.received.lock().unwrap().push(ReceivedRequest {
        method: parts.method,
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        headers: parts.headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    });

    (
        state.status,
        [(CONTENT_TYPE, state.content_type)],
        state.body.clone(),
    )
        .into_response()
}
