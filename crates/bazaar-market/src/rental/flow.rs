//! Rent-booking flow state machine.
//!
//! Drives one booking interaction from input collection through validation,
//! confirmation, and submission. The submission half is split sans-io
//! ([`BookingFlow::begin_submit`] / [`BookingFlow::complete_submit`]) so the
//! at-most-one-in-flight guarantee is enforced by a state check between the
//! two, not by the transport; [`BookingFlow::confirm`] composes them around
//! the collaborator call.

use crate::api::{ApiStatus, BookingMutations};
use crate::catalog::{Product, RentalMode, RentalRate};
use crate::error::MarketError;
use crate::ids::ProductId;
use crate::rental::selection::{RentalSelection, SelectionUpdate};
use crate::rental::window::TimeWindow;
use tracing::{debug, warn};

/// Steps in the rent-booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BookingStep {
    /// Collecting dates/duration from the user.
    CollectingInput,
    /// Running mode validation (entered and left within `validate`).
    Validating,
    /// Window resolved; waiting for the user to confirm.
    AwaitingConfirmation,
    /// Submission request in flight.
    Submitting,
    /// Booking accepted by the server.
    Succeeded,
    /// Booking rejected; message retained for display.
    Failed,
    /// Abandoned by the user.
    Cancelled,
}

impl BookingStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStep::CollectingInput => "collecting_input",
            BookingStep::Validating => "validating",
            BookingStep::AwaitingConfirmation => "awaiting_confirmation",
            BookingStep::Submitting => "submitting",
            BookingStep::Succeeded => "succeeded",
            BookingStep::Failed => "failed",
            BookingStep::Cancelled => "cancelled",
        }
    }

    /// Check if no further transitions are possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStep::Succeeded | BookingStep::Cancelled)
    }
}

/// The wire payload of one booking submission.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRequest {
    /// Product being booked.
    pub product_id: ProductId,
    /// Window start in wire form.
    pub rent_start: String,
    /// Window end in wire form.
    pub rent_end: String,
    /// Whole hours booked. Zero for per-day rentals, where the server derives
    /// the charge from the calendar range.
    pub hours: i64,
}

/// State machine for one rent-booking interaction.
#[derive(Debug, Clone)]
pub struct BookingFlow {
    product_id: ProductId,
    rate: RentalRate,
    step: BookingStep,
    selection: RentalSelection,
    window: Option<TimeWindow>,
    error: Option<String>,
}

impl BookingFlow {
    /// Start a booking for a product. The selection's mode is fixed from the
    /// product's rental terms; a product with none cannot be booked.
    pub fn begin(product: &Product) -> Result<Self, MarketError> {
        let rate = product
            .rental_rate()
            .ok_or(MarketError::UnsupportedMode(product.id))?;
        Ok(Self {
            product_id: product.id,
            rate,
            step: BookingStep::CollectingInput,
            selection: RentalSelection::new(rate.mode),
            window: None,
            error: None,
        })
    }

    /// Current step.
    pub fn step(&self) -> BookingStep {
        self.step
    }

    /// The in-progress selection.
    pub fn selection(&self) -> &RentalSelection {
        &self.selection
    }

    /// The resolved window, present from `AwaitingConfirmation` on.
    pub fn window(&self) -> Option<&TimeWindow> {
        self.window.as_ref()
    }

    /// The failure message to display, if the last submission failed.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The rental terms being booked against.
    pub fn rate(&self) -> RentalRate {
        self.rate
    }

    /// Merge user-entered fields into the selection. Never transitions state;
    /// legal only while input is being collected.
    pub fn set_selection(&mut self, update: SelectionUpdate) -> Result<(), MarketError> {
        if self.step != BookingStep::CollectingInput {
            return Err(self.bad_transition(BookingStep::CollectingInput));
        }
        self.selection.apply(update);
        Ok(())
    }

    /// Validate the selection. Success stores the resolved window and moves
    /// to `AwaitingConfirmation`; failure returns to `CollectingInput` with
    /// every entered field intact.
    pub fn validate(&mut self) -> Result<TimeWindow, MarketError> {
        if self.step != BookingStep::CollectingInput {
            return Err(self.bad_transition(BookingStep::Validating));
        }
        self.step = BookingStep::Validating;
        match self.selection.resolve() {
            Ok(window) => {
                self.window = Some(window);
                self.step = BookingStep::AwaitingConfirmation;
                Ok(window)
            }
            Err(e) => {
                self.step = BookingStep::CollectingInput;
                Err(e)
            }
        }
    }

    /// Move to `Submitting` and yield the request payload, exactly once per
    /// submission. Returns `Ok(None)` when a submission is already in flight;
    /// nothing is re-sent.
    pub fn begin_submit(&mut self) -> Result<Option<BookingRequest>, MarketError> {
        match self.step {
            BookingStep::Submitting => Ok(None),
            BookingStep::AwaitingConfirmation => {
                let window = self
                    .window
                    .ok_or(MarketError::SelectionIncomplete("resolved window"))?;
                self.step = BookingStep::Submitting;
                let hours = match self.rate.mode {
                    RentalMode::PerHour => window.billable_units(RentalMode::PerHour),
                    RentalMode::PerDay => 0,
                };
                let (rent_start, rent_end) = window.wire_pair();
                Ok(Some(BookingRequest {
                    product_id: self.product_id,
                    rent_start,
                    rent_end,
                    hours,
                }))
            }
            _ => Err(self.bad_transition(BookingStep::Submitting)),
        }
    }

    /// Settle an in-flight submission with the server's response envelope.
    /// A late response after the flow left `Submitting` (e.g. the dialog was
    /// closed) is ignored.
    pub fn complete_submit(&mut self, status: &ApiStatus) {
        if self.step != BookingStep::Submitting {
            return;
        }
        if status.is_success() {
            debug!(product_id = %self.product_id, "booking accepted");
            self.step = BookingStep::Succeeded;
            self.error = None;
            self.window = None;
            self.selection = RentalSelection::new(self.rate.mode);
        } else {
            warn!(
                product_id = %self.product_id,
                status = %status.status_code,
                "booking rejected: {}",
                status.status_message
            );
            self.step = BookingStep::Failed;
            self.error = Some(status.status_message.clone());
        }
    }

    /// Submit the confirmed booking through the collaborator. Issues at most
    /// one request; calling again while a submission is in flight is a no-op.
    /// Transport failures land in `Failed` with a message, same as server
    /// rejections.
    pub async fn confirm(&mut self, api: &dyn BookingMutations) -> Result<BookingStep, MarketError> {
        let Some(request) = self.begin_submit()? else {
            return Ok(self.step);
        };
        debug!(product_id = %request.product_id, hours = request.hours, "submitting booking");
        match api.book_for_rent(&request).await {
            Ok(status) => {
                self.complete_submit(&status);
                Ok(self.step)
            }
            Err(e) => {
                warn!(product_id = %request.product_id, "booking submission failed: {e}");
                self.step = BookingStep::Failed;
                self.error = Some(e.to_string());
                Ok(self.step)
            }
        }
    }

    /// Return a failed flow to input collection for another attempt. Entered
    /// fields are kept; the stale window and error are dropped.
    pub fn retry(&mut self) -> Result<(), MarketError> {
        if self.step != BookingStep::Failed {
            return Err(self.bad_transition(BookingStep::CollectingInput));
        }
        self.step = BookingStep::CollectingInput;
        self.window = None;
        self.error = None;
        Ok(())
    }

    /// Abandon the booking. Legal while collecting input or awaiting
    /// confirmation; the selection is discarded.
    pub fn cancel(&mut self) -> Result<(), MarketError> {
        match self.step {
            BookingStep::CollectingInput | BookingStep::AwaitingConfirmation => {
                self.step = BookingStep::Cancelled;
                self.window = None;
                self.selection = RentalSelection::new(self.rate.mode);
                Ok(())
            }
            _ => Err(self.bad_transition(BookingStep::Cancelled)),
        }
    }

    /// Estimated total rent for the resolved window: billable units times the
    /// per-unit price, partial units rounded up. Display-only; the server
    /// computes the charge authoritatively.
    pub fn quote(&self) -> Option<f64> {
        self.window
            .map(|w| w.billable_units(self.rate.mode) as f64 * self.rate.price)
    }

    fn bad_transition(&self, to: BookingStep) -> MarketError {
        MarketError::InvalidTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }
}
