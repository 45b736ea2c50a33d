// file: src/server/handlers.rs
// description: request handlers for the search and chat endpoints

use super::{AppState, ValidatedJson};
use crate::error::ProxyError;
use crate::models::{ChatReply, Query, SearchResultRecord};
use axum::{Json, extract::State};

pub async fn search_issues(
    State(state): State<AppState>,
    ValidatedJson(query): ValidatedJson<Query>,
) -> Result<Json<Vec<SearchResultRecord>>, ProxyError> {
    state.search.search(&query).await.map(Json)
}

pub async fn generate_response(
    State(state): State<AppState>,
    ValidatedJson(query): ValidatedJson<Query>,
) -> Result<Json<ChatReply>, ProxyError> {
    state.chat.generate(&query).await.map(Json)
}
