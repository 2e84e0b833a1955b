//! Occupancy ledger and busy-set construction.
//!
//! Occupancy is tracked per minute, one 1440-entry row per weekday, so
//! intervals that do not line up with the slot grid still block exactly
//! the minutes they cover. A slot counts as occupied as soon as any of its
//! minutes is.
//!
//! The ledger is owned by a single allocation run: seeded from the busy
//! intervals, grown as study blocks are placed, then dropped.

use std::collections::{BTreeMap, BTreeSet};

use crate::models::grid::{DayWindow, DAYS_PER_WEEK, MINUTES_PER_DAY};
use crate::models::TimeInterval;

/// Per-weekday minute occupancy.
#[derive(Debug, Clone)]
pub struct OccupancyLedger {
    window: DayWindow,
    days: Vec<Vec<bool>>,
}

impl OccupancyLedger {
    /// Creates an empty ledger for a window.
    pub fn new(window: DayWindow) -> Self {
        Self {
            window,
            days: vec![vec![false; MINUTES_PER_DAY as usize]; DAYS_PER_WEEK as usize],
        }
    }

    /// Creates a ledger seeded with busy intervals.
    pub fn from_busy(window: DayWindow, busy: &[TimeInterval]) -> Self {
        let mut ledger = Self::new(window);
        for interval in busy {
            ledger.mark(interval.weekday, interval.start_min, interval.end_min);
        }
        ledger
    }

    /// Marks `[start_min, end_min)` occupied. Out-of-range parts are ignored.
    pub fn mark(&mut self, weekday: u8, start_min: u32, end_min: u32) {
        let Some(row) = self.days.get_mut(weekday as usize) else {
            return;
        };
        let end = end_min.min(MINUTES_PER_DAY) as usize;
        let start = (start_min as usize).min(end);
        row[start..end].fill(true);
    }

    /// Whether minute `minute` on `weekday` is occupied.
    ///
    /// Minutes outside the day or an invalid weekday count as occupied.
    pub fn is_occupied(&self, weekday: u8, minute: u32) -> bool {
        self.days
            .get(weekday as usize)
            .and_then(|row| row.get(minute as usize))
            .copied()
            .unwrap_or(true)
    }

    /// Whether any minute of the slot starting at `slot_start` is occupied.
    pub fn is_slot_occupied(&self, weekday: u8, slot_start: u32) -> bool {
        let end = slot_start + self.window.slot_minutes.max(1);
        (slot_start..end).any(|m| self.is_occupied(weekday, m))
    }

    /// Contiguous free minutes starting at `from`, up to the end of the
    /// last whole slot.
    pub fn free_run(&self, weekday: u8, from: u32) -> u32 {
        let limit = self.window.grid_end();
        if from < self.window.start_min || from >= limit {
            return 0;
        }
        (from..limit)
            .take_while(|&m| !self.is_occupied(weekday, m))
            .count() as u32
    }

    /// Occupied minutes of a weekday inside the window.
    pub fn occupied_minutes(&self, weekday: u8) -> u32 {
        (self.window.start_min..self.window.end_min)
            .filter(|&m| self.is_occupied(weekday, m))
            .count() as u32
    }

    /// Occupied slot starts per weekday. Weekdays with nothing occupied
    /// are omitted.
    pub fn occupied_slots(&self) -> BTreeMap<u8, BTreeSet<u32>> {
        let mut slots = BTreeMap::new();
        for weekday in 0..DAYS_PER_WEEK {
            let taken: BTreeSet<u32> = self
                .window
                .slot_starts()
                .filter(|&s| self.is_slot_occupied(weekday, s))
                .collect();
            if !taken.is_empty() {
                slots.insert(weekday, taken);
            }
        }
        slots
    }
}

/// Builds the busy set: weekday → occupied slot starts.
///
/// Does not modify its input; building twice from the same intervals
/// yields the same map.
pub fn build_busy_slots(window: DayWindow, busy: &[TimeInterval]) -> BTreeMap<u8, BTreeSet<u32>> {
    OccupancyLedger::from_busy(window, busy).occupied_slots()
}
