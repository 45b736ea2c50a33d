// file: src/server/response.rs
// description: renders proxy errors as `{"detail": ...}` responses

use crate::error::ProxyError;
use axum::{
    Json,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed with {}: {}", status, self);
        }
        (status, Json(json!({ "detail": self.detail() }))).into_response()
    }
}
