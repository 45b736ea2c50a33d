// file: src/credentials/metadata.rs
// description: ambient workload identity via the compute metadata server
// reference: https://cloud.google.com/compute/docs/access/authenticate-workloads#applications

use super::{TokenProvider, TokenResponse};
use crate::error::{ProxyError, Result};
use crate::models::BearerToken;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

pub struct MetadataServerCredentials {
    base_url: String,
    scope: String,
    client: Client,
}

impl MetadataServerCredentials {
    pub fn new(base_url: String, scope: String, client: Client) -> Self {
        Self {
            base_url,
            scope,
            client,
        }
    }

    fn token_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), TOKEN_PATH)
    }
}

#[async_trait]
impl TokenProvider for MetadataServerCredentials {
    async fn fetch_token(&self) -> Result<BearerToken> {
        let url = self.token_url();
        debug!("Requesting workload identity token from {}", url);

        let response = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .query(&[("scopes", self.scope.as_str())])
            .send()
            .await
            .map_err(|e| ProxyError::Credential(format!("metadata server unreachable: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProxyError::Credential(format!(
                "metadata server returned {}: {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ProxyError::Credential(format!("cannot parse metadata token: {}", e))
        })?;

        Ok(token.into())
    }

    fn describe(&self) -> String {
        format!("workload identity from {}", self.base_url)
    }
}
