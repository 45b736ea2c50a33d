// file: src/models/query.rs
// description: Inbound request body shared by both endpoints

use serde::{Deserialize, Serialize};

/// `{"query": "..."}`. Any other shape is rejected before reaching a proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub query: String,
}

impl Query {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.query
    }
}
