// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod chat;
pub mod query;
pub mod search_result;
pub mod token;

pub use chat::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ChatReply};
pub use query::Query;
pub use search_result::{SearchResultRecord, UpstreamSearchRequest, UpstreamSearchResponse};
pub use token::BearerToken;
