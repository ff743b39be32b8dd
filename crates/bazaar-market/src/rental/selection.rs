//! In-progress rental selection state.

use crate::catalog::RentalMode;
use crate::error::MarketError;
use crate::rental::window::{resolve_daily_window, resolve_hourly_window, TimeWindow};
use chrono::{NaiveDate, NaiveDateTime};

/// The user's in-progress rental selection for one booking interaction.
///
/// The mode is fixed at creation from the product being booked; the rest of
/// the fields are filled in as the user picks dates. Which fields matter
/// depends on the mode, and [`RentalSelection::resolve`] is where that split
/// ends: past it everything works on a [`TimeWindow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RentalSelection {
    /// Billing mode, fixed by the product being booked.
    pub mode: RentalMode,
    /// First rental day (per-day mode).
    pub start_date: Option<NaiveDate>,
    /// Last rental day, inclusive (per-day mode).
    pub end_date: Option<NaiveDate>,
    /// Rental start instant (per-hour mode).
    pub start_date_time: Option<NaiveDateTime>,
    /// Whole hours rented (per-hour mode).
    pub duration_hours: Option<i64>,
}

/// Partial update applied to a selection; absent fields are left untouched,
/// so a validation failure never costs the user already-entered values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SelectionUpdate {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub start_date_time: Option<NaiveDateTime>,
    pub duration_hours: Option<i64>,
}

impl RentalSelection {
    /// Create an empty selection for the given mode.
    pub fn new(mode: RentalMode) -> Self {
        Self {
            mode,
            start_date: None,
            end_date: None,
            start_date_time: None,
            duration_hours: None,
        }
    }

    /// Merge the present fields of an update into the selection.
    pub fn apply(&mut self, update: SelectionUpdate) {
        if let Some(start_date) = update.start_date {
            self.start_date = Some(start_date);
        }
        if let Some(end_date) = update.end_date {
            self.end_date = Some(end_date);
        }
        if let Some(start_date_time) = update.start_date_time {
            self.start_date_time = Some(start_date_time);
        }
        if let Some(duration_hours) = update.duration_hours {
            self.duration_hours = Some(duration_hours);
        }
    }

    /// Resolve the selection into a canonical window, running the validation
    /// the active mode requires.
    pub fn resolve(&self) -> Result<TimeWindow, MarketError> {
        match self.mode {
            RentalMode::PerDay => {
                let start = self
                    .start_date
                    .ok_or(MarketError::SelectionIncomplete("start date"))?;
                let end = self
                    .end_date
                    .ok_or(MarketError::SelectionIncomplete("end date"))?;
                resolve_daily_window(start, end)
            }
            RentalMode::PerHour => {
                let start = self
                    .start_date_time
                    .ok_or(MarketError::SelectionIncomplete("start time"))?;
                let hours = self
                    .duration_hours
                    .ok_or(MarketError::SelectionIncomplete("duration"))?;
                resolve_hourly_window(start, hours)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_apply_merges_only_present_fields() {
        let mut selection = RentalSelection::new(RentalMode::PerDay);
        selection.apply(SelectionUpdate {
            start_date: Some(date(2024, 6, 1)),
            ..SelectionUpdate::default()
        });
        selection.apply(SelectionUpdate {
            end_date: Some(date(2024, 6, 3)),
            ..SelectionUpdate::default()
        });
        assert_eq!(selection.start_date, Some(date(2024, 6, 1)));
        assert_eq!(selection.end_date, Some(date(2024, 6, 3)));
    }

    #[test]
    fn test_resolve_requires_mode_fields() {
        let selection = RentalSelection::new(RentalMode::PerHour);
        assert!(matches!(
            selection.resolve(),
            Err(MarketError::SelectionIncomplete("start time"))
        ));
    }

    #[test]
    fn test_resolve_daily() {
        let mut selection = RentalSelection::new(RentalMode::PerDay);
        selection.apply(SelectionUpdate {
            start_date: Some(date(2024, 6, 1)),
            end_date: Some(date(2024, 6, 3)),
            ..SelectionUpdate::default()
        });
        let window = selection.resolve().unwrap();
        assert_eq!(window.start.date(), date(2024, 6, 1));
        assert_eq!(window.end.date(), date(2024, 6, 3));
    }

    #[test]
    fn test_resolve_keeps_validation_per_mode() {
        // A nonsense daily range on a per-hour selection must not matter
        let mut selection = RentalSelection::new(RentalMode::PerHour);
        selection.apply(SelectionUpdate {
            start_date: Some(date(2024, 6, 9)),
            end_date: Some(date(2024, 6, 1)),
            start_date_time: date(2024, 6, 1).and_hms_opt(10, 0, 0),
            duration_hours: Some(2),
        });
        assert!(selection.resolve().is_ok());
    }
}
