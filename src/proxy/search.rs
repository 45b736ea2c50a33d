// file: src/proxy/search.rs
// description: forwards queries to the enterprise search engine and reshapes the top hits
// reference: https://cloud.google.com/generative-ai-app-builder/docs/preview-search-results

use crate::config::SearchConfig;
use crate::credentials::TokenProvider;
use crate::error::{ProxyError, Result};
use crate::models::{Query, SearchResultRecord, UpstreamSearchRequest, UpstreamSearchResponse};
use crate::utils::Validator;
use reqwest::{Client, StatusCode};
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct SearchProxy {
    client: Client,
    credentials: Arc<dyn TokenProvider>,
    config: SearchConfig,
}

impl SearchProxy {
    pub fn new(client: Client, credentials: Arc<dyn TokenProvider>, config: SearchConfig) -> Self {
        Self {
            client,
            credentials,
            config,
        }
    }

    /// Runs one search. Order of the upstream ranking is preserved and at most
    /// `max_results` records come back; zero hits is `ProxyError::NotFound`.
    pub async fn search(&self, query: &Query) -> Result<Vec<SearchResultRecord>> {
        let token = self.credentials.fetch_token().await.inspect_err(|e| {
            warn!("Credential acquisition failed: {}", e);
        })?;

        match token.expires_at() {
            Some(at) if token.is_expired() => {
                warn!("Search token already expired at {}", at.to_rfc3339())
            }
            Some(at) => debug!("Search token valid until {}", at.to_rfc3339()),
            None => debug!("Search token carries no expiry"),
        }

        let request = UpstreamSearchRequest::new(query.as_str(), self.config.page_size);

        debug!("Forwarding search query ({} chars)", query.as_str().len());

        // no retry or backoff on transport failures
        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", token.authorization())
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ProxyError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_else(|e| {
                warn!("Failed to read search upstream body: {}", e);
                "Unknown error".to_string()
            });
            warn!(
                "Search upstream returned {}: {}",
                status,
                Validator::truncate_text(&body, 200)
            );
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let payload: UpstreamSearchResponse = response.json().await.map_err(|e| {
            ProxyError::Serialization(format!("Failed to parse search response: {}", e))
        })?;

        let results = payload.into_results();
        if results.is_empty() {
            info!("Search returned no results");
            return Err(ProxyError::NotFound);
        }

        let total = results.len();
        let records: Vec<SearchResultRecord> = results
            .into_iter()
            .take(self.config.max_results)
            .map(SearchResultRecord::from)
            .collect();

        info!("Search returned {} results, forwarding {}", total, records.len());
        Ok(records)
    }
}
