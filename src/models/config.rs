//! Planner configuration.
//!
//! Everything one allocation run consumes apart from the start date:
//! subjects (in round-robin order), the horizon, block bounds, the daily
//! window and slot size, and the fixed busy intervals.

use serde::{Deserialize, Serialize};

use super::grid::{to_minute_of_day, DayWindow};
use super::{Subject, TimeInterval};
use crate::dispatching::SelectionPolicy;

/// Configuration for one allocation run.
///
/// Subject order matters: it seeds round-robin tie-breaking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Subjects to plan for, in rotation order.
    pub subjects: Vec<Subject>,
    /// Number of calendar days planned, starting at the start date.
    pub planning_horizon_days: u32,
    /// Shortest study block worth placing (minutes).
    pub min_block_minutes: u32,
    /// Longest single study block (minutes).
    pub max_block_minutes: u32,
    /// Daily window start (minute-of-day).
    pub day_start_min: u32,
    /// Daily window end (minute-of-day, exclusive).
    pub day_end_min: u32,
    /// Slot granularity (minutes).
    pub slot_minutes: u32,
    /// Fixed weekly busy intervals.
    pub busy_intervals: Vec<TimeInterval>,
    /// How the next subject is chosen when several compete.
    #[serde(default)]
    pub selection: SelectionPolicy,
    /// Whether a block may fall below the minimum when only remaining
    /// demand makes it short.
    #[serde(default = "default_allow_short_final_block")]
    pub allow_short_final_block: bool,
}

fn default_allow_short_final_block() -> bool {
    true
}

impl PlannerConfig {
    /// Creates a configuration with a one-week horizon, 1–2 hour blocks,
    /// a 08:00–22:00 window with 30 minute slots and no busy time.
    pub fn new(subjects: Vec<Subject>) -> Self {
        Self {
            subjects,
            planning_horizon_days: 7,
            min_block_minutes: 60,
            max_block_minutes: 120,
            day_start_min: to_minute_of_day(8, 0),
            day_end_min: to_minute_of_day(22, 0),
            slot_minutes: 30,
            busy_intervals: Vec::new(),
            selection: SelectionPolicy::default(),
            allow_short_final_block: default_allow_short_final_block(),
        }
    }

    /// Sets the planning horizon in days.
    pub fn with_horizon_days(mut self, days: u32) -> Self {
        self.planning_horizon_days = days;
        self
    }

    /// Sets the study block bounds in minutes.
    pub fn with_block_bounds(mut self, min_minutes: u32, max_minutes: u32) -> Self {
        self.min_block_minutes = min_minutes;
        self.max_block_minutes = max_minutes;
        self
    }

    /// Sets the daily window and slot size.
    pub fn with_day_window(mut self, start_min: u32, end_min: u32, slot_minutes: u32) -> Self {
        self.day_start_min = start_min;
        self.day_end_min = end_min;
        self.slot_minutes = slot_minutes;
        self
    }

    /// Adds a busy interval.
    pub fn with_busy(mut self, interval: TimeInterval) -> Self {
        self.busy_intervals.push(interval);
        self
    }

    /// Sets the subject selection policy.
    pub fn with_selection(mut self, selection: SelectionPolicy) -> Self {
        self.selection = selection;
        self
    }

    /// Allows or forbids demand-clamped blocks shorter than the minimum.
    pub fn with_short_final_block(mut self, allow: bool) -> Self {
        self.allow_short_final_block = allow;
        self
    }

    /// The daily window as a grid.
    pub fn window(&self) -> DayWindow {
        DayWindow::new(self.day_start_min, self.day_end_min, self.slot_minutes)
    }
}
