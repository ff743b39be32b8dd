//! Rental time-window resolution and formatting.
//!
//! Both rental modes resolve to the same `{start, end}` shape so everything
//! past validation can stay mode-agnostic. All arithmetic is absolute-time
//! arithmetic on `chrono` values; timestamps are never assembled from string
//! fragments.

use crate::catalog::RentalMode;
use crate::error::MarketError;
use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Canonical timestamp format carried in submission requests.
pub const WIRE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Human-readable timestamp format for confirmation dialogs.
pub const DISPLAY_FORMAT: &str = "%B %-d, %Y %-I:%M %p";

/// A resolved rental window. Invariant: `end` is strictly after `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// Length of the window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Billable units for the window, partial units rounded up.
    pub fn billable_units(&self, mode: RentalMode) -> i64 {
        let duration = self.duration();
        match mode {
            RentalMode::PerHour => {
                let hours = duration.num_hours();
                let remainder = duration - Duration::hours(hours);
                hours + i64::from(remainder > Duration::zero())
            }
            RentalMode::PerDay => {
                let days = duration.num_days();
                let remainder = duration - Duration::days(days);
                days + i64::from(remainder > Duration::zero())
            }
        }
    }

    /// Both endpoints in wire form.
    pub fn wire_pair(&self) -> (String, String) {
        (format_wire(self.start), format_wire(self.end))
    }

    /// Both endpoints in display form.
    pub fn display_pair(&self) -> (String, String) {
        (format_display(self.start), format_display(self.end))
    }
}

/// Resolve a whole-day rental selection into a canonical window.
///
/// The window covers `start_date` through `end_date` inclusive: local
/// midnight of the first day to 23:59:59 of the last. Equal inputs always
/// produce identical outputs.
pub fn resolve_daily_window(
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<TimeWindow, MarketError> {
    if end_date < start_date {
        return Err(MarketError::InvalidRange {
            start: start_date,
            end: end_date,
        });
    }
    let start = start_date.and_time(NaiveTime::MIN);
    let end = end_date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::seconds(1);
    Ok(TimeWindow { start, end })
}

/// Resolve an hourly rental selection into a canonical window.
///
/// `end = start + duration_hours`, computed by duration addition so the end
/// carries correctly across day, month, and year boundaries.
pub fn resolve_hourly_window(
    start: NaiveDateTime,
    duration_hours: i64,
) -> Result<TimeWindow, MarketError> {
    if duration_hours < 1 {
        return Err(MarketError::InvalidDuration(duration_hours));
    }
    let duration =
        Duration::try_hours(duration_hours).ok_or(MarketError::InvalidDuration(duration_hours))?;
    let end = start
        .checked_add_signed(duration)
        .ok_or(MarketError::InvalidDuration(duration_hours))?;
    Ok(TimeWindow { start, end })
}

/// Format a timestamp for confirmation dialogs. Never sent over the wire.
pub fn format_display(timestamp: NaiveDateTime) -> String {
    timestamp.format(DISPLAY_FORMAT).to_string()
}

/// Format a timestamp in the canonical wire form the booking service parses.
pub fn format_wire(timestamp: NaiveDateTime) -> String {
    timestamp.format(WIRE_FORMAT).to_string()
}

/// Parse a wire-format timestamp. Exact inverse of [`format_wire`].
pub fn parse_wire(s: &str) -> Result<NaiveDateTime, MarketError> {
    NaiveDateTime::parse_from_str(s, WIRE_FORMAT)
        .map_err(|e| MarketError::BadTimestamp(format!("{s}: {e}")))
}

/// The current local calendar date, the earliest selectable rental day.
/// Recomputed on every call.
pub fn today_floor() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, 0).unwrap()
    }

    #[test]
    fn test_daily_window_spans_days_inclusive() {
        let window = resolve_daily_window(date(2024, 6, 1), date(2024, 6, 3)).unwrap();
        assert_eq!(window.start, datetime(2024, 6, 1, 0, 0));
        assert_eq!(window.end, date(2024, 6, 3).and_hms_opt(23, 59, 59).unwrap());
        assert_eq!(window.start.date(), date(2024, 6, 1));
        assert_eq!(window.end.date(), date(2024, 6, 3));
        assert!(window.start <= window.end);
    }

    #[test]
    fn test_daily_window_single_day() {
        let window = resolve_daily_window(date(2024, 6, 1), date(2024, 6, 1)).unwrap();
        assert_eq!(window.start.date(), window.end.date());
        assert!(window.end > window.start);
    }

    #[test]
    fn test_daily_window_rejects_reversed_range() {
        let err = resolve_daily_window(date(2024, 6, 3), date(2024, 6, 1)).unwrap_err();
        assert!(matches!(err, MarketError::InvalidRange { .. }));
    }

    #[test]
    fn test_daily_window_is_idempotent() {
        let first = resolve_daily_window(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
        let second = resolve_daily_window(date(2024, 2, 28), date(2024, 3, 1)).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.wire_pair(), second.wire_pair());
    }

    #[test]
    fn test_hourly_window_exact_duration() {
        let start = datetime(2024, 5, 14, 9, 0);
        let window = resolve_hourly_window(start, 5).unwrap();
        assert_eq!(window.duration(), Duration::hours(5));
    }

    #[test]
    fn test_hourly_window_carries_across_midnight() {
        let start = datetime(2024, 3, 10, 23, 0);
        let window = resolve_hourly_window(start, 3).unwrap();
        assert_eq!(window.end, datetime(2024, 3, 11, 2, 0));
    }

    #[test]
    fn test_hourly_window_carries_across_year_boundary() {
        let start = datetime(2024, 12, 31, 23, 0);
        let window = resolve_hourly_window(start, 2).unwrap();
        assert_eq!(window.end, datetime(2025, 1, 1, 1, 0));
    }

    #[test]
    fn test_hourly_window_rejects_non_positive_duration() {
        let start = datetime(2024, 5, 14, 9, 0);
        assert!(matches!(
            resolve_hourly_window(start, 0),
            Err(MarketError::InvalidDuration(0))
        ));
        assert!(matches!(
            resolve_hourly_window(start, -4),
            Err(MarketError::InvalidDuration(-4))
        ));
    }

    #[test]
    fn test_wire_roundtrip() {
        let timestamps = [
            datetime(2024, 3, 10, 23, 30),
            datetime(2024, 1, 1, 0, 0),
            date(2031, 12, 31).and_hms_opt(23, 59, 59).unwrap(),
        ];
        for t in timestamps {
            assert_eq!(parse_wire(&format_wire(t)).unwrap(), t);
        }
    }

    #[test]
    fn test_wire_format_shape() {
        let t = datetime(2024, 3, 10, 23, 30);
        assert_eq!(format_wire(t), "2024-03-10 23:30:00");
    }

    #[test]
    fn test_parse_wire_rejects_garbage() {
        assert!(parse_wire("10/03/2024 23:30").is_err());
        assert!(parse_wire("").is_err());
    }

    #[test]
    fn test_display_format() {
        assert_eq!(
            format_display(datetime(2024, 6, 1, 0, 0)),
            "June 1, 2024 12:00 AM"
        );
        assert_eq!(
            format_display(datetime(2024, 3, 10, 23, 30)),
            "March 10, 2024 11:30 PM"
        );
    }

    #[test]
    fn test_billable_units_round_up() {
        let window = TimeWindow {
            start: datetime(2024, 5, 1, 9, 0),
            end: datetime(2024, 5, 1, 11, 30),
        };
        assert_eq!(window.billable_units(RentalMode::PerHour), 3);

        let daily = resolve_daily_window(date(2024, 6, 1), date(2024, 6, 3)).unwrap();
        assert_eq!(daily.billable_units(RentalMode::PerDay), 3);
    }
}
