// file: src/utils/validation.rs
// description: configuration validation utilities and helpers
// reference: input validation patterns

use crate::error::{ProxyError, Result};

pub struct Validator;

impl Validator {
    pub fn validate_url(url: &str) -> Result<()> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ProxyError::Config(format!("Invalid URL format: {}", url)));
        }
        Ok(())
    }

    pub fn validate_port(port: u16) -> Result<()> {
        if port == 0 {
            return Err(ProxyError::Config("Port cannot be 0".to_string()));
        }
        Ok(())
    }

    /// Browser origins are scheme + host (+ port), never a path.
    pub fn validate_origin(origin: &str) -> Result<()> {
        Self::validate_url(origin)?;

        let rest = origin
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or_default();
        if rest.is_empty() || rest.contains('/') {
            return Err(ProxyError::Config(format!(
                "Invalid CORS origin: {}",
                origin
            )));
        }
        Ok(())
    }

    /// Shortens upstream payloads before they reach the logs.
    pub fn truncate_text(text: &str, max_length: usize) -> String {
        match text.char_indices().nth(max_length) {
            None => text.to_string(),
            Some((idx, _)) => format!("{}...", &text[..idx]),
        }
    }
}
