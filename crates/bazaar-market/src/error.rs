//! Marketplace error types.

use crate::ids::ProductId;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in client-side marketplace operations.
#[derive(Error, Debug)]
pub enum MarketError {
    /// Rental end date falls before the start date.
    #[error("Invalid rental range: end {end} is before start {start}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// Hourly rental duration is not a positive number of hours.
    #[error("Invalid rental duration: {0} hour(s)")]
    InvalidDuration(i64),

    /// Booking attempted against a product that is not offered for rent.
    #[error("Product {0} has no rental mode")]
    UnsupportedMode(ProductId),

    /// Requested page index is outside the known page range.
    #[error("Page {page} is out of range (total pages: {total_pages})")]
    OutOfRange { page: u32, total_pages: u32 },

    /// Illegal booking-flow state transition.
    #[error("Invalid booking transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    /// Selection is missing a field the active rental mode requires.
    #[error("Selection incomplete: missing {0}")]
    SelectionIncomplete(&'static str),

    /// Listing draft failed validation.
    #[error("Invalid product: {0}")]
    InvalidProduct(String),

    /// Timestamp string does not match the wire format.
    #[error("Unparseable timestamp: {0}")]
    BadTimestamp(String),

    /// A collaborator call failed at the transport level.
    #[error("Remote call failed: {0}")]
    Remote(String),
}

impl MarketError {
    /// Check if this is a local validation failure (never sent to the server).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MarketError::InvalidRange { .. }
                | MarketError::InvalidDuration(_)
                | MarketError::SelectionIncomplete(_)
                | MarketError::InvalidProduct(_)
        )
    }
}
