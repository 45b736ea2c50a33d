// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;
pub mod proxy;
pub mod server;
pub mod utils;

pub use crate::config::{ChatConfig, Config, CredentialsConfig, SearchConfig, ServerConfig};
pub use credentials::{
    MetadataServerCredentials, ServiceAccountCredentials, ServiceAccountKey, TokenProvider,
};
pub use error::{ProxyError, Result};
pub use models::{BearerToken, ChatReply, Query, SearchResultRecord};
pub use proxy::{ChatProxy, SearchProxy};
pub use server::{AppState, build_router};
pub use utils::Validator;
