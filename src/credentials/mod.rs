// file: src/credentials/mod.rs
// description: bearer token acquisition for the search upstream
// reference: https://google.aip.dev/auth/4110

mod metadata;
mod service_account;

pub use metadata::MetadataServerCredentials;
pub use service_account::{ServiceAccountCredentials, ServiceAccountKey};

use crate::config::CredentialsConfig;
use crate::error::Result;
use crate::models::BearerToken;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

/// Environment variable consulted by the ambient strategy before falling back
/// to the metadata server.
pub const APPLICATION_CREDENTIALS_ENV: &str = "GOOGLE_APPLICATION_CREDENTIALS";

/// Source of bearer tokens. Implementations fetch a fresh token on every call;
/// nothing is cached between requests.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn fetch_token(&self) -> Result<BearerToken>;

    /// Short label used in logs.
    fn describe(&self) -> String;
}

/// Picks the credential strategy once, at startup.
pub fn from_config(config: &CredentialsConfig, client: Client) -> Arc<dyn TokenProvider> {
    let provider: Arc<dyn TokenProvider> = if config.is_production() {
        match std::env::var_os(APPLICATION_CREDENTIALS_ENV) {
            Some(path) => Arc::new(ServiceAccountCredentials::new(
                path.into(),
                config.scope.clone(),
                client,
            )),
            None => Arc::new(MetadataServerCredentials::new(
                config.metadata_url.clone(),
                config.scope.clone(),
                client,
            )),
        }
    } else {
        Arc::new(ServiceAccountCredentials::new(
            config.service_account_file.clone(),
            config.scope.clone(),
            client,
        ))
    };

    info!("Using {} for search credentials", provider.describe());
    provider
}

/// OAuth token endpoint payload, shared by both strategies.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

impl From<TokenResponse> for BearerToken {
    fn from(response: TokenResponse) -> Self {
        BearerToken::expiring_in(response.access_token, response.expires_in)
    }
}
