//! Demand estimation and horizon calendar.
//!
//! Converts weekly targets into minutes owed over the planning horizon and
//! decides, per weekday, which subjects may still receive study time.
//!
//! # Exam cutoff granularity
//! The output grid has no date dimension, so the exam cutoff is applied
//! per weekday: a subject is active on weekday `w` if at least one horizon
//! date falling on `w` is on or before its exam. With a horizon longer
//! than a week this can keep a subject on a weekday whose later dates are
//! already past the exam.

use chrono::{Days, NaiveDate};
use std::collections::BTreeSet;

use crate::models::grid::{weekday_of, DAYS_PER_WEEK};
use crate::models::Subject;

/// Minutes owed for a subject over a horizon.
///
/// `round(weekly_target_hours / 7 × horizon_days × 60)`. Negative or
/// non-finite targets yield 0; validation rejects them earlier.
pub fn demand_minutes(weekly_target_hours: f64, horizon_days: u32) -> i64 {
    if !weekly_target_hours.is_finite() || weekly_target_hours <= 0.0 {
        return 0;
    }
    (weekly_target_hours / 7.0 * f64::from(horizon_days) * 60.0).round() as i64
}

/// The calendar dates covered by a planning run.
///
/// Queries look at most one week past the start date, so their cost does
/// not depend on the horizon length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HorizonCalendar {
    start_date: NaiveDate,
    horizon_days: u32,
}

impl HorizonCalendar {
    /// Dates `[start_date, start_date + horizon_days)`.
    pub fn new(start_date: NaiveDate, horizon_days: u32) -> Self {
        Self {
            start_date,
            horizon_days,
        }
    }

    /// Days from the start date to the first date falling on `weekday`.
    fn offset_to(&self, weekday: u8) -> u32 {
        let from = u32::from(weekday_of(self.start_date));
        (u32::from(weekday) + u32::from(DAYS_PER_WEEK) - from) % u32::from(DAYS_PER_WEEK)
    }

    /// Weekdays touched by the horizon, ascending by index.
    pub fn weekdays(&self) -> BTreeSet<u8> {
        (0..DAYS_PER_WEEK)
            .filter(|&w| self.first_date_on(w).is_some())
            .collect()
    }

    /// First horizon date falling on a weekday.
    ///
    /// `None` when the horizon ends before reaching it, or the date lies
    /// past the end of chrono's calendar.
    pub fn first_date_on(&self, weekday: u8) -> Option<NaiveDate> {
        if weekday >= DAYS_PER_WEEK {
            return None;
        }
        let offset = self.offset_to(weekday);
        if offset >= self.horizon_days {
            return None;
        }
        self.start_date.checked_add_days(Days::new(u64::from(offset)))
    }

    /// Whether a subject may receive study on a weekday.
    ///
    /// Later dates on the same weekday only move further from the exam, so
    /// the first one decides.
    pub fn is_active_on_weekday(&self, subject: &Subject, weekday: u8) -> bool {
        self.first_date_on(weekday).is_some_and(|d| subject.is_active_on(d))
    }
}

/// Remaining minutes owed per subject, indexed like the configuration.
///
/// Only ever decreases during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemandTable {
    remaining: Vec<i64>,
}

impl DemandTable {
    /// Initial demand for every subject.
    pub fn estimate(subjects: &[Subject], horizon_days: u32) -> Self {
        Self {
            remaining: subjects
                .iter()
                .map(|s| demand_minutes(s.weekly_target_hours, horizon_days))
                .collect(),
        }
    }

    /// Remaining minutes of a subject (0 for an unknown index).
    pub fn remaining(&self, subject_idx: usize) -> i64 {
        self.remaining.get(subject_idx).copied().unwrap_or(0)
    }

    /// Whether a subject still needs study.
    #[inline]
    pub fn has_remaining(&self, subject_idx: usize) -> bool {
        self.remaining(subject_idx) > 0
    }

    /// Records `minutes` of study for a subject.
    pub fn consume(&mut self, subject_idx: usize, minutes: u32) {
        if let Some(r) = self.remaining.get_mut(subject_idx) {
            *r -= i64::from(minutes);
        }
    }

    /// Total minutes still owed.
    pub fn total_remaining(&self) -> i64 {
        self.remaining.iter().map(|&r| r.max(0)).sum()
    }
}
