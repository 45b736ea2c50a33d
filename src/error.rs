// file: src/error.rs
// description: Custom error types and result type aliases
// reference: https://docs.rs/thiserror

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProxyError>;

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Failed to obtain access token: {0}")]
    Credential(String),

    #[error("No results found.")]
    NotFound,

    /// Non-200 answer from the search upstream, passed through verbatim.
    #[error("{body}")]
    Upstream { status: u16, body: String },

    #[error("Search upstream unreachable: {0}")]
    Transport(String),

    #[error("Error al consultar ChatGPT: {0}")]
    Chat(String),

    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ProxyError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ProxyError::Credential(_)
            | ProxyError::Transport(_)
            | ProxyError::Chat(_)
            | ProxyError::Config(_)
            | ProxyError::Serialization(_)
            | ProxyError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text placed in the `detail` field of the error body.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}
