//! Bearer-credential access.

use std::sync::RwLock;

/// Read side of the credential store.
///
/// Implementations return the freshest token on every call. Callers attach
/// it per request and must not cache the result across requests; a token
/// refreshed mid-session has to reach the very next call.
pub trait TokenProvider: Send + Sync {
    /// The current bearer token, absent when no user is signed in.
    fn current_token(&self) -> Option<String>;
}

/// In-memory credential store.
///
/// Holds the opaque bearer string the server issued at sign-in. Where the
/// string is persisted between runs is the embedding application's concern.
#[derive(Debug, Default)]
pub struct TokenStore {
    token: RwLock<Option<String>>,
}

impl TokenStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the bearer token issued at sign-in.
    pub fn set(&self, token: impl Into<String>) {
        if let Ok(mut guard) = self.token.write() {
            *guard = Some(token.into());
        }
    }

    /// Drop the stored token (sign-out).
    pub fn clear(&self) {
        if let Ok(mut guard) = self.token.write() {
            *guard = None;
        }
    }

    /// Check if a token is present.
    pub fn is_signed_in(&self) -> bool {
        self.current_token().is_some()
    }
}

impl TokenProvider for TokenStore {
    fn current_token(&self) -> Option<String> {
        self.token.read().map(|guard| guard.clone()).unwrap_or(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_set_and_clear() {
        let store = TokenStore::new();
        assert!(!store.is_signed_in());
        assert_eq!(store.current_token(), None);

        store.set("jwt-abc");
        assert!(store.is_signed_in());
        assert_eq!(store.current_token().as_deref(), Some("jwt-abc"));

        store.clear();
        assert!(!store.is_signed_in());
    }

    #[test]
    fn test_provider_reads_latest_token() {
        let store = TokenStore::new();
        store.set("first");

        let provider: &dyn TokenProvider = &store;
        assert_eq!(provider.current_token().as_deref(), Some("first"));

        // A refresh is visible on the very next read
        store.set("second");
        assert_eq!(provider.current_token().as_deref(), Some("second"));
    }
}
