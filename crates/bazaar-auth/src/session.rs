//! Signed-in session state.

use crate::AuthError;
use serde::{Deserialize, Serialize};

/// A signed-in user session as the client sees it: the issued bearer token
/// plus the identity the screens display.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    /// Opaque bearer token issued by the server.
    pub token: String,
    /// Signed-in user's email.
    pub email: String,
    /// Unix timestamp of sign-in.
    pub signed_in_at: i64,
}

impl AuthSession {
    /// Create a session from a sign-in response.
    pub fn new(token: impl Into<String>, email: impl Into<String>) -> Result<Self, AuthError> {
        let token = token.into();
        let email = email.into();
        if token.is_empty() {
            return Err(AuthError::EmptyField("token"));
        }
        if email.is_empty() {
            return Err(AuthError::EmptyField("email"));
        }
        Ok(Self {
            token,
            email,
            signed_in_at: current_timestamp(),
        })
    }
}

/// Get current Unix timestamp.
fn current_timestamp() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
