// file: src/credentials/service_account.rs
// description: service-account key file credentials (JWT bearer grant)
// reference: https://developers.google.com/identity/protocols/oauth2/service-account#httprest

use super::{TokenProvider, TokenResponse};
use crate::error::{ProxyError, Result};
use crate::models::BearerToken;
use crate::utils::Validator;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Fields of a downloaded service-account key that the grant needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ProxyError::Credential(format!(
                "cannot read service account file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        serde_json::from_str(raw)
            .map_err(|e| ProxyError::Credential(format!("malformed service account key: {}", e)))
    }

    /// Signs the RS256 assertion exchanged for an access token.
    pub fn sign_assertion(&self, scope: &str, issued_at: i64) -> Result<String> {
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope,
            aud: &self.token_uri,
            iat: issued_at,
            exp: issued_at + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.private_key_id.clone();

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| ProxyError::Credential(format!("invalid private key: {}", e)))?;

        jsonwebtoken::encode(&header, &claims, &key)
            .map_err(|e| ProxyError::Credential(format!("cannot sign assertion: {}", e)))
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

pub struct ServiceAccountCredentials {
    key_file: PathBuf,
    scope: String,
    client: Client,
}

impl ServiceAccountCredentials {
    pub fn new(key_file: PathBuf, scope: String, client: Client) -> Self {
        Self {
            key_file,
            scope,
            client,
        }
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountCredentials {
    async fn fetch_token(&self) -> Result<BearerToken> {
        // re-read on every call so a rotated key is picked up without restart
        let key = ServiceAccountKey::from_file(&self.key_file)?;
        Validator::validate_url(&key.token_uri)
            .map_err(|e| ProxyError::Credential(e.to_string()))?;

        let assertion = key.sign_assertion(&self.scope, chrono::Utc::now().timestamp())?;

        debug!("Exchanging assertion for {} at {}", key.client_email, key.token_uri);

        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| ProxyError::Credential(format!("token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!("Token endpoint rejected assertion with status {}", status);
            return Err(ProxyError::Credential(format!(
                "token endpoint returned {}: {}",
                status, error_text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            ProxyError::Credential(format!("cannot parse token response: {}", e))
        })?;

        Ok(token.into())
    }

    fn describe(&self) -> String {
        format!("service account key file {}", self.key_file.display())
    }
}
