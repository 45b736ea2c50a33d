// file: src/server/mod.rs
// description: HTTP entrypoint wiring both proxies behind an axum router
// reference: https://docs.rs/axum

mod extract;
mod handlers;
mod response;

pub use extract::ValidatedJson;

use crate::config::{Config, ServerConfig};
use crate::credentials::{self, TokenProvider};
use crate::error::{ProxyError, Result};
use crate::proxy::{ChatProxy, SearchProxy};
use crate::utils::Validator;
use axum::{
    Router,
    http::HeaderValue,
    routing::post,
};
use reqwest::Client;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchProxy>,
    pub chat: Arc<ChatProxy>,
}

impl AppState {
    pub fn new(search: SearchProxy, chat: ChatProxy) -> Self {
        Self {
            search: Arc::new(search),
            chat: Arc::new(chat),
        }
    }

    /// Builds both proxies from configuration, picking the credential strategy once.
    pub fn from_config(config: &Config) -> Self {
        let client = Client::new();
        let token_provider = credentials::from_config(&config.credentials, client.clone());
        Self::with_token_provider(config, client, token_provider)
    }

    pub fn with_token_provider(
        config: &Config,
        client: Client,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self::new(
            SearchProxy::new(client.clone(), token_provider, config.search.clone()),
            ChatProxy::new(client, config.chat.clone()),
        )
    }
}

pub fn build_router(state: AppState, server: &ServerConfig) -> Result<Router> {
    Ok(Router::new()
        .route("/search-issues", post(handlers::search_issues))
        .route("/generate-response", post(handlers::generate_response))
        .layer(create_cors_layer(&server.cors_allowed_origins)?)
        .layer(TraceLayer::new_for_http())
        .with_state(state))
}

/// Credentials are allowed, so methods and headers are mirrored rather than `*`.
fn create_cors_layer(allowed_origins: &[String]) -> Result<CorsLayer> {
    let mut origins = Vec::with_capacity(allowed_origins.len());
    for origin in allowed_origins {
        Validator::validate_origin(origin)?;
        let value = origin
            .parse::<HeaderValue>()
            .map_err(|e| ProxyError::Config(format!("Invalid CORS origin {}: {}", origin, e)))?;
        origins.push(value);
    }

    if origins.is_empty() {
        warn!("No CORS origins configured; browser requests will be rejected");
    }

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

pub async fn serve(config: &Config) -> Result<()> {
    let state = AppState::from_config(config);
    let app = build_router(state, &config.server)?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
