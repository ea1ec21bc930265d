/// JWT Claims structure
///
/// Represents the payload of an access token: the subject username
/// plus standard JWT timestamps (RFC 7519).

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AuthError};

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (username). Absent in structurally valid but unusable tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
}

impl Claims {
    /// Create new claims for a subject
    ///
    /// # Arguments
    /// * `subject` - Username the token is issued for
    /// * `expire_minutes` - Token lifetime in minutes from now
    pub fn new(subject: &str, expire_minutes: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: Some(subject.to_string()),
            exp: now + expire_minutes * 60,
            iat: now,
        }
    }

    /// Extract the subject username from the claims
    ///
    /// # Errors
    /// Returns error if the token carries no subject claim
    pub fn subject(&self) -> Result<&str, AppError> {
        self.sub
            .as_deref()
            .ok_or(AppError::Auth(AuthError::MissingSubject))
    }

    /// Check if the token has expired (exact comparison, no leeway)
    pub fn is_expired(&self) -> bool {
        let now = chrono::Utc::now().timestamp();
        self.exp < now
    }
}
