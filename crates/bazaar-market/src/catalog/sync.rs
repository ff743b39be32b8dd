//! Keeping a product feed consistent after local mutations.
//!
//! Deletion's effect on the current page is locally derivable, so it is
//! applied optimistically (the item disappears before the mutation is even
//! dispatched) and rolled back if the server refuses. Creation and edits are
//! the opposite: the item's sort position is server-determined, so the only
//! safe move is to invalidate and let the next read re-fetch.

use crate::api::{ApiStatus, CatalogQuery, ProductMutations};
use crate::catalog::feed::ProductFeed;
use crate::catalog::product::Product;
use crate::error::MarketError;
use crate::ids::ProductId;
use tracing::{debug, info, warn};

/// An optimistic removal awaiting its mutation outcome.
#[derive(Debug)]
pub struct PendingDelete {
    product_id: ProductId,
    index: usize,
    product: Product,
}

impl PendingDelete {
    /// The product being deleted.
    pub fn product_id(&self) -> ProductId {
        self.product_id
    }
}

/// Optimistically remove `product_id` from the feed. Called before the delete
/// mutation is dispatched, so the item is gone the instant the user acts.
/// Returns `None` when the item is not on the current page.
pub fn begin_delete(feed: &mut ProductFeed, product_id: ProductId) -> Option<PendingDelete> {
    let (index, product) = feed.take_product(product_id)?;
    debug!(%product_id, index, "optimistically removed product from feed");
    Some(PendingDelete {
        product_id,
        index,
        product,
    })
}

/// Settle an optimistic removal with the mutation's outcome.
///
/// Failure, whether transport or a non-success envelope, re-inserts the item
/// at its original index and records the message for display. Success keeps the
/// removal, and when it emptied a non-first page, steps back one page instead
/// of leaving an empty page visible.
pub async fn complete_delete(
    feed: &mut ProductFeed,
    catalog: &dyn CatalogQuery,
    pending: PendingDelete,
    outcome: Result<ApiStatus, MarketError>,
) -> Result<ApiStatus, MarketError> {
    match outcome {
        Ok(status) if status.is_success() => {
            info!(product_id = %pending.product_id, "product deleted");
            feed.forget_expanded(pending.product_id);
            if feed.items().is_empty() && feed.page_index() > 0 {
                let target = feed.page_index() - 1;
                feed.invalidate();
                feed.set_page(catalog, target).await?;
            }
            Ok(status)
        }
        Ok(status) => {
            warn!(
                product_id = %pending.product_id,
                status = %status.status_code,
                "delete rejected, restoring item: {}",
                status.status_message
            );
            feed.set_error(status.status_message.clone());
            feed.restore_product(pending.index, pending.product);
            Ok(status)
        }
        Err(e) => {
            warn!(product_id = %pending.product_id, "delete failed, restoring item: {e}");
            feed.set_error(e.to_string());
            feed.restore_product(pending.index, pending.product);
            Err(e)
        }
    }
}

/// Delete a product: optimistic removal, dispatch, settle.
///
/// When the item is not on the current page the feed is just invalidated and
/// the mutation dispatched; the next read picks up the server's view.
pub async fn apply_delete(
    feed: &mut ProductFeed,
    catalog: &dyn CatalogQuery,
    products: &dyn ProductMutations,
    product_id: ProductId,
) -> Result<ApiStatus, MarketError> {
    let Some(pending) = begin_delete(feed, product_id) else {
        feed.invalidate();
        return products.delete_product(product_id).await;
    };
    let outcome = products.delete_product(product_id).await;
    complete_delete(feed, catalog, pending, outcome).await
}

/// After a create or edit mutation: invalidate only. No optimistic insert;
/// the server owns the item's page position and derived fields.
pub fn apply_write(feed: &mut ProductFeed) {
    feed.invalidate();
}
