//! Marketplace domain types and client-side logic for Bazaar.
//!
//! This crate provides the state the listing and booking screens run on:
//!
//! - **Catalog**: product listings, the paginated per-screen feed store, and
//!   the mutation-consistency helpers (optimistic delete, invalidate on
//!   create/edit)
//! - **Rental**: time-window resolution for hourly and daily rentals, and the
//!   booking flow state machine
//! - **Api**: the collaborator traits a transport implements
//!
//! # Example
//!
//! ```rust,ignore
//! use bazaar_market::prelude::*;
//!
//! // Book a product for rent
//! let mut flow = BookingFlow::begin(&product)?;
//! flow.set_selection(SelectionUpdate {
//!     start_date: Some(start),
//!     end_date: Some(end),
//!     ..SelectionUpdate::default()
//! })?;
//! let window = flow.validate()?;
//! println!("Renting {} to {}", window.display_pair().0, window.display_pair().1);
//! flow.confirm(&api).await?;
//!
//! // Drive a listing screen
//! let mut feed = ProductFeed::new(FeedQuery::Mine);
//! feed.ensure_fresh(&api).await?;
//! catalog::apply_delete(&mut feed, &api, &api, product_id).await?;
//! ```

pub mod api;
pub mod catalog;
pub mod error;
pub mod ids;
pub mod rental;

pub use error::MarketError;
pub use ids::ProductId;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::api::{
        ActivityKind, ApiStatus, BookingMutations, CatalogQuery, FeedQuery, ProductMutations,
        ProductPage,
    };
    pub use crate::error::MarketError;
    pub use crate::ids::ProductId;

    // Catalog
    pub use crate::catalog::{
        AvailabilityStatus, PendingDelete, Product, ProductDraft, ProductFeed, RentalMode,
        RentalRate,
    };

    // Rental
    pub use crate::rental::{
        resolve_daily_window, resolve_hourly_window, today_floor, BookingFlow, BookingRequest,
        BookingStep, RentalSelection, SelectionUpdate, TimeWindow,
    };
}
