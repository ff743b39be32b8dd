//! Collaborator interfaces to the remote marketplace service.
//!
//! The core never talks to a network directly; it calls these traits. A
//! transport crate implements them, and tests substitute mocks. Transport
//! failures come back as [`MarketError::Remote`]; a server-side rejection is
//! data, carried in the [`ApiStatus`] envelope.

use crate::catalog::{Product, ProductDraft};
use crate::error::MarketError;
use crate::ids::ProductId;
use crate::rental::BookingRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// The mutation response envelope the server returns.
///
/// The status code travels as a decimal string on the wire;
/// [`ApiStatus::is_success`] owns the numeric interpretation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ApiStatus {
    /// Decimal status code string, e.g. "200", "400".
    pub status_code: String,
    /// Human-readable outcome, surfaced to the user verbatim on failure.
    pub status_message: String,
}

impl ApiStatus {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status_code: code.into(),
            status_message: message.into(),
        }
    }

    /// Check if the code parses into the 2xx range. An unparseable code is
    /// not a success.
    pub fn is_success(&self) -> bool {
        self.status_code
            .trim()
            .parse::<u16>()
            .map(|code| (200..300).contains(&code))
            .unwrap_or(false)
    }
}

/// One page of catalog results, as the server reports it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    /// The page's items, server order preserved.
    pub products: Vec<Product>,
    /// Total pages for the query.
    pub total_pages: u32,
    /// Total items across all pages.
    pub total_elements: i64,
    /// The zero-based index of this page.
    pub current_page: u32,
}

/// The user's past-activity buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    Bought,
    Sold,
    Borrowed,
    Lent,
}

impl ActivityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Bought => "BOUGHT",
            ActivityKind::Sold => "SOLD",
            ActivityKind::Borrowed => "BORROWED",
            ActivityKind::Lent => "LENT",
        }
    }
}

/// Which logical product listing a screen shows. Each variant is a distinct
/// server-side query; two screens never share a feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedQuery {
    /// Every open listing.
    All,
    /// The signed-in user's own listings.
    Mine,
    /// One of the user's activity buckets.
    Activity(ActivityKind),
}

/// Paginated catalog reads.
#[async_trait]
pub trait CatalogQuery: Send + Sync {
    /// Fetch one page of the given listing.
    async fn fetch_page(
        &self,
        query: FeedQuery,
        page: u32,
        size: u32,
    ) -> Result<ProductPage, MarketError>;
}

/// Purchase and rental-booking mutations.
#[async_trait]
pub trait BookingMutations: Send + Sync {
    /// Submit a resolved rental booking.
    async fn book_for_rent(&self, request: &BookingRequest) -> Result<ApiStatus, MarketError>;

    /// Buy a product outright.
    async fn buy_product(&self, product_id: ProductId) -> Result<ApiStatus, MarketError>;
}

/// Listing lifecycle mutations.
#[async_trait]
pub trait ProductMutations: Send + Sync {
    /// Create a listing from a draft.
    async fn create_product(&self, draft: &ProductDraft) -> Result<ApiStatus, MarketError>;

    /// Replace a listing's fields with a draft.
    async fn edit_product(
        &self,
        product_id: ProductId,
        draft: &ProductDraft,
    ) -> Result<ApiStatus, MarketError>;

    /// Delete a listing.
    async fn delete_product(&self, product_id: ProductId) -> Result<ApiStatus, MarketError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_success_range() {
        assert!(ApiStatus::new("200", "OK").is_success());
        assert!(ApiStatus::new("201", "Created").is_success());
        assert!(!ApiStatus::new("400", "Invalid rental period").is_success());
        assert!(!ApiStatus::new("500", "Internal server error").is_success());
    }

    #[test]
    fn test_status_unparseable_code_is_failure() {
        assert!(!ApiStatus::new("", "empty").is_success());
        assert!(!ApiStatus::new("OK", "words").is_success());
    }

    #[test]
    fn test_status_wire_shape() {
        let status: ApiStatus =
            serde_json::from_str(r#"{"statusCode":"400","statusMessage":"Invalid rental period"}"#)
                .unwrap();
        assert!(!status.is_success());
        assert_eq!(status.status_message, "Invalid rental period");
    }

    #[test]
    fn test_page_wire_shape() {
        let page: ProductPage = serde_json::from_str(
            r#"{"products":[],"totalPages":3,"totalElements":25,"currentPage":1}"#,
        )
        .unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.current_page, 1);
        assert!(page.products.is_empty());
    }
}
