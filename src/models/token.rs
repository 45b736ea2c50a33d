// file: src/models/token.rs
// description: Short-lived bearer credential used for outbound calls

use chrono::{DateTime, Duration, Utc};
use std::fmt;

#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken {
    secret: String,
    expires_at: Option<DateTime<Utc>>,
}

impl BearerToken {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: None,
        }
    }

    /// Builds a token from an OAuth `expires_in` value (seconds from now).
    pub fn expiring_in(secret: impl Into<String>, expires_in: Option<i64>) -> Self {
        Self {
            secret: secret.into(),
            expires_at: expires_in.map(|secs| Utc::now() + Duration::seconds(secs)),
        }
    }

    pub fn secret(&self) -> &str {
        &self.secret
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|at| at <= Utc::now())
    }

    /// Value for the `Authorization` header.
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.secret)
    }
}

impl fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BearerToken")
            .field("secret", &"<redacted>")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        let token = BearerToken::new("mock_token");
        assert_eq!(token.authorization(), "Bearer mock_token");
        assert!(!token.is_expired());
        assert!(token.expires_at().is_none());
    }

    #[test]
    fn test_expiry() {
        assert!(!BearerToken::expiring_in("t", Some(3600)).is_expired());
        assert!(BearerToken::expiring_in("t", Some(-5)).is_expired());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let rendered = format!("{:?}", BearerToken::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
