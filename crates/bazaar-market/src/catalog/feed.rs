//! Paginated product feed store.
//!
//! One `ProductFeed` backs one listing screen. Loads are split sans-io:
//! [`ProductFeed::begin_load`] tags the fetch and [`ProductFeed::apply_page`]
//! settles it, discarding any response whose tag has been superseded. The
//! last requested page wins, and a response arriving after the screen moved
//! on mutates nothing.

use crate::api::{CatalogQuery, FeedQuery, ProductPage};
use crate::catalog::product::Product;
use crate::error::MarketError;
use crate::ids::ProductId;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Default page size for listing screens.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Tag identifying one in-flight page fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    seq: u64,
}

impl PageRequest {
    /// The page this fetch targets.
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// Client-side state for one paginated listing screen.
///
/// The expand/collapse flags live in a map keyed by product id, not on the
/// items themselves, so re-fetching a page never resets the user's choices.
#[derive(Debug)]
pub struct ProductFeed {
    query: FeedQuery,
    page_index: u32,
    page_size: u32,
    items: Vec<Product>,
    total_pages: Option<u32>,
    expanded: HashMap<ProductId, bool>,
    loading: bool,
    stale: bool,
    loaded: bool,
    last_error: Option<String>,
    seq: u64,
}

impl ProductFeed {
    /// Create an empty feed for a listing screen.
    pub fn new(query: FeedQuery) -> Self {
        Self::with_page_size(query, DEFAULT_PAGE_SIZE)
    }

    /// Create an empty feed with a screen-specific page size.
    pub fn with_page_size(query: FeedQuery, page_size: u32) -> Self {
        Self {
            query,
            page_index: 0,
            page_size,
            items: Vec::new(),
            total_pages: None,
            expanded: HashMap::new(),
            loading: false,
            stale: false,
            loaded: false,
            last_error: None,
            seq: 0,
        }
    }

    /// The listing this feed shows.
    pub fn query(&self) -> FeedQuery {
        self.query
    }

    /// Currently displayed items. During a reload these are the previous
    /// page's items; there is no flash-to-empty.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// The current (or targeted, while loading) zero-based page index.
    pub fn page_index(&self) -> u32 {
        self.page_index
    }

    /// Items per page for this screen.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Server-reported page count, unknown before the first successful load.
    pub fn total_pages(&self) -> Option<u32> {
        self.total_pages
    }

    /// Check if a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Check if the feed has been invalidated since its last load.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// The last fetch or mutation failure to show, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Start a fetch for `page`. The returned tag must be handed back to
    /// [`ProductFeed::apply_page`] with the fetch's outcome.
    pub fn begin_load(&mut self, page: u32) -> PageRequest {
        self.seq += 1;
        self.loading = true;
        self.page_index = page;
        debug!(query = ?self.query, page, "loading catalog page");
        PageRequest { page, seq: self.seq }
    }

    /// Settle a fetch. A response whose tag no longer matches the most recent
    /// `begin_load` is discarded untouched. Success replaces the items and
    /// page count and leaves the expand flags alone; failure records the
    /// message and keeps the previous items displayed.
    pub fn apply_page(
        &mut self,
        request: PageRequest,
        result: Result<ProductPage, MarketError>,
    ) -> Result<(), MarketError> {
        if request.seq != self.seq {
            debug!(page = request.page, "discarding superseded page response");
            return Ok(());
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.items = page.products;
                self.total_pages = Some(page.total_pages);
                self.loaded = true;
                self.stale = false;
                self.last_error = None;
                Ok(())
            }
            Err(e) => {
                warn!(query = ?self.query, page = request.page, "page load failed: {e}");
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Fetch and apply one page through the collaborator.
    pub async fn load(&mut self, api: &dyn CatalogQuery, page: u32) -> Result<(), MarketError> {
        let request = self.begin_load(page);
        let result = api.fetch_page(self.query, page, self.page_size).await;
        self.apply_page(request, result)
    }

    /// Navigate to a page, failing fast when the index is outside the known
    /// page range.
    pub async fn set_page(&mut self, api: &dyn CatalogQuery, page: u32) -> Result<(), MarketError> {
        if let Some(total_pages) = self.total_pages {
            if total_pages > 0 && page >= total_pages {
                return Err(MarketError::OutOfRange { page, total_pages });
            }
        }
        self.load(api, page).await
    }

    /// Mark the feed stale; the next read re-fetches regardless of freshness.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// The read path: re-fetch the current page when the feed is stale or has
    /// never loaded, otherwise do nothing.
    pub async fn ensure_fresh(&mut self, api: &dyn CatalogQuery) -> Result<(), MarketError> {
        if self.stale || !self.loaded {
            self.load(api, self.page_index).await
        } else {
            Ok(())
        }
    }

    /// Flip the expand/collapse flag for a product. Pure local state.
    pub fn toggle_expanded(&mut self, product_id: ProductId) {
        let flag = self.expanded.entry(product_id).or_insert(false);
        *flag = !*flag;
    }

    /// Check the expand/collapse flag for a product.
    pub fn is_expanded(&self, product_id: ProductId) -> bool {
        self.expanded.get(&product_id).copied().unwrap_or(false)
    }

    /// Lazy housekeeping: drop expand flags for ids not on the current page.
    /// Never called implicitly; growth is bounded by distinct ids seen.
    pub fn prune_expanded(&mut self) {
        let present: Vec<ProductId> = self.items.iter().map(|p| p.id).collect();
        self.expanded.retain(|id, _| present.contains(id));
    }

    pub(crate) fn take_product(&mut self, product_id: ProductId) -> Option<(usize, Product)> {
        let index = self.items.iter().position(|p| p.id == product_id)?;
        Some((index, self.items.remove(index)))
    }

    pub(crate) fn restore_product(&mut self, index: usize, product: Product) {
        let index = index.min(self.items.len());
        self.items.insert(index, product);
    }

    pub(crate) fn forget_expanded(&mut self, product_id: ProductId) {
        self.expanded.remove(&product_id);
    }

    pub(crate) fn set_error(&mut self, message: String) {
        self.last_error = Some(message);
    }
}
