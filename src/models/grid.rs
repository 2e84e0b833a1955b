//! Weekly grid coordinates.
//!
//! The grid is 7 weekdays × a half-open day window `[start, end)`
//! subdivided into fixed-length slots. A slot is identified by its start
//! minute.
//!
//! # Time Model
//! All times are minutes since midnight (`0..=1440`). Weekdays are
//! numbered Monday-first, `0 = Monday` through `6 = Sunday`.
//!
//! # Remainder
//! The last slot is the greatest start `t` with `t + slot ≤ end`. Any
//! remainder after it is unaddressable and never offered for study.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Minutes in one day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Days in the repeating week.
pub const DAYS_PER_WEEK: u8 = 7;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Converts an hour/minute pair to a minute-of-day.
#[inline]
pub fn to_minute_of_day(hour: u32, minute: u32) -> u32 {
    hour * 60 + minute
}

/// Converts fractional hours to whole minutes, rounding to nearest.
///
/// Returns `None` for negative or non-finite input.
pub fn hours_to_minutes(hours: f64) -> Option<u32> {
    if !hours.is_finite() || hours < 0.0 {
        return None;
    }
    let minutes = (hours * 60.0).round();
    if minutes > u32::MAX as f64 {
        return None;
    }
    Some(minutes as u32)
}

/// Formats a minute-of-day as `HH:MM`. `1440` renders as `24:00`.
pub fn format_hhmm(minute_of_day: u32) -> String {
    format!("{:02}:{:02}", minute_of_day / 60, minute_of_day % 60)
}

/// Parses `HH:MM` into a minute-of-day.
///
/// Accepts `00:00` through `24:00`. Returns `None` on malformed input.
pub fn parse_hhmm(text: &str) -> Option<u32> {
    let (h, m) = text.trim().split_once(':')?;
    let hour: u32 = h.parse().ok()?;
    let minute: u32 = m.parse().ok()?;
    if hour > 24 || minute >= 60 {
        return None;
    }
    let total = to_minute_of_day(hour, minute);
    (total <= MINUTES_PER_DAY).then_some(total)
}

/// Monday-first weekday index (0..=6) of a date.
#[inline]
pub fn weekday_of(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_monday() as u8
}

/// Short English label for a weekday index, `"?"` if out of range.
pub fn weekday_label(weekday: u8) -> &'static str {
    WEEKDAY_LABELS
        .get(weekday as usize)
        .copied()
        .unwrap_or("?")
}

/// The daily window and its slot subdivision.
///
/// Assumes `start_min < end_min` and `slot_minutes > 0`; callers go through
/// [`validate_config`](crate::validation::validate_config) first. With a
/// zero slot length every query reports an empty grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayWindow {
    /// Window start (minute-of-day, inclusive).
    pub start_min: u32,
    /// Window end (minute-of-day, exclusive).
    pub end_min: u32,
    /// Slot length in minutes.
    pub slot_minutes: u32,
}

impl DayWindow {
    /// Creates a window.
    pub fn new(start_min: u32, end_min: u32, slot_minutes: u32) -> Self {
        Self {
            start_min,
            end_min,
            slot_minutes,
        }
    }

    /// Length of the window in minutes.
    #[inline]
    pub fn span_minutes(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }

    /// Number of whole slots in the window.
    pub fn slot_count(&self) -> u32 {
        if self.slot_minutes == 0 {
            return 0;
        }
        self.span_minutes() / self.slot_minutes
    }

    /// End of the last addressable slot. Equals `start_min` for an empty grid.
    pub fn grid_end(&self) -> u32 {
        self.start_min + self.slot_count() * self.slot_minutes
    }

    /// Start minutes of all addressable slots, ascending.
    pub fn slot_starts(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.slot_count()).map(move |i| self.start_min + i * self.slot_minutes)
    }

    /// First slot boundary strictly after `minute`.
    ///
    /// For a slot-aligned `minute` this is `minute + slot_minutes`.
    pub fn next_slot_boundary(&self, minute: u32) -> u32 {
        if self.slot_minutes == 0 {
            return self.end_min.max(minute + 1);
        }
        if minute < self.start_min {
            return self.start_min;
        }
        let offset = (minute - self.start_min) / self.slot_minutes + 1;
        self.start_min + offset * self.slot_minutes
    }
}
