//! Newtype wrapper for server-assigned identifiers.
//!
//! The server owns identity; the client only ever passes ids back. The
//! newtype keeps a product id from being confused with a page index or an
//! hour count in call sites that take several integers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A unique, server-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Wrap a raw id.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    pub fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = ProductId::new(42);
        assert_eq!(id.get(), 42);
        assert_eq!(format!("{}", id), "42");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(id, ProductId::new(7));
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }

    #[test]
    fn test_id_equality() {
        assert_eq!(ProductId::new(1), ProductId::from(1));
        assert_ne!(ProductId::new(1), ProductId::new(2));
    }
}
