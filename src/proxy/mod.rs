// file: src/proxy/mod.rs
// description: upstream proxies module exports
// reference: internal module structure

pub mod chat;
pub mod search;

pub use chat::ChatProxy;
pub use search::SearchProxy;
