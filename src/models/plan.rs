//! Allocation result.
//!
//! A [`WeeklyPlan`] is the ordered sequence an allocation run returns:
//! busy intervals in input order, then study intervals in placement order
//! (weekday-major, time-ascending within a weekday).

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::TimeInterval;

/// The ordered output of one allocation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    /// Busy intervals followed by study intervals.
    pub intervals: Vec<TimeInterval>,
}

impl WeeklyPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a plan from busy intervals (input order) and study intervals
    /// (placement order).
    pub fn from_parts(busy: Vec<TimeInterval>, study: Vec<TimeInterval>) -> Self {
        let mut intervals = busy;
        intervals.extend(study);
        Self { intervals }
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Busy intervals, in input order.
    pub fn busy(&self) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter().filter(|i| i.is_busy())
    }

    /// Study intervals, in placement order.
    pub fn study(&self) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter().filter(|i| i.is_study())
    }

    /// Number of study intervals.
    pub fn study_count(&self) -> usize {
        self.study().count()
    }

    /// All intervals on a weekday, in plan order.
    pub fn on_weekday(&self, weekday: u8) -> impl Iterator<Item = &TimeInterval> {
        self.intervals.iter().filter(move |i| i.weekday == weekday)
    }

    /// Study intervals labeled with a subject.
    pub fn study_for<'a>(&'a self, subject: &'a str) -> impl Iterator<Item = &'a TimeInterval> {
        self.study().filter(move |i| i.label == subject)
    }

    /// Total study minutes allocated to a subject.
    pub fn minutes_for_subject(&self, subject: &str) -> u32 {
        self.study_for(subject).map(|i| i.duration_min()).sum()
    }

    /// Total study minutes across all subjects.
    pub fn total_study_minutes(&self) -> u32 {
        self.study().map(|i| i.duration_min()).sum()
    }

    /// Study minutes grouped by subject.
    pub fn minutes_by_subject(&self) -> BTreeMap<String, u32> {
        let mut totals = BTreeMap::new();
        for i in self.study() {
            *totals.entry(i.label.clone()).or_insert(0) += i.duration_min();
        }
        totals
    }

    /// Pairs of overlapping intervals (by index), checking study against
    /// everything. Busy/busy overlaps come from input and are ignored.
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.intervals.iter().enumerate() {
            for (j, b) in self.intervals.iter().enumerate().skip(i + 1) {
                if (a.is_study() || b.is_study()) && a.overlaps(b) {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}
