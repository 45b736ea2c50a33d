// Shared helpers for the HTTP-level tests
#![allow(dead_code)]

pub mod mock_upstream;

use abcall_analitica::{AppState, BearerToken, Config, ProxyError, TokenProvider, build_router};
use async_trait::async_trait;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Hands out the same token every time.
pub struct StaticTokenProvider(pub &'static str);

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn fetch_token(&self) -> abcall_analitica::Result<BearerToken> {
        Ok(BearerToken::new(self.0))
    }

    fn describe(&self) -> String {
        "static test token".to_string()
    }
}

/// Always fails with the given message.
pub struct FailingTokenProvider(pub &'static str);

#[async_trait]
impl TokenProvider for FailingTokenProvider {
    async fn fetch_token(&self) -> abcall_analitica::Result<BearerToken> {
        Err(ProxyError::Credential(self.0.to_string()))
    }

    fn describe(&self) -> String {
        "failing test token".to_string()
    }
}

pub fn test_config(search_url: &str, chat_url: &str) -> Config {
    let mut config = Config::default_config();
    config.search.endpoint = search_url.to_string();
    config.chat.endpoint = chat_url.to_string();
    config.chat.api_key = Some("sk-test".to_string());
    config
}

pub fn create_app(config: &Config, tokens: Arc<dyn TokenProvider>) -> Router {
    let state = AppState::with_token_provider(config, reqwest::Client::new(), tokens);
    build_router(state, &config.server).unwrap()
}

/// An address nothing listens on.
pub fn unreachable_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/unreachable", port)
}

pub async fn post_raw(app: Router, path: &str, content_type: Option<&str>, body: String) -> (StatusCode, Value) {
    let mut builder = Request::builder().method("POST").uri(path);
    if let Some(content_type) = content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    let req = builder.body(Body::from(body)).unwrap();

    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

pub async fn post_json(app: Router, path: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, path, Some("application/json"), body.to_string()).await
}
