//! Rental booking module.
//!
//! Contains the time-window resolvers, the in-progress selection, and the
//! booking flow state machine.

mod flow;
mod selection;
mod window;

pub use flow::{BookingFlow, BookingRequest, BookingStep};
pub use selection::{RentalSelection, SelectionUpdate};
pub use window::{
    format_display, format_wire, parse_wire, resolve_daily_window, resolve_hourly_window,
    today_floor, TimeWindow, DISPLAY_FORMAT, WIRE_FORMAT,
};
