//! Time intervals on the weekly grid.
//!
//! A [`TimeInterval`] is either a fixed busy period supplied by the
//! configuration or a study block produced by the allocator. Both share
//! the same half-open `[start_min, end_min)` representation on a weekday.

use serde::{Deserialize, Serialize};

use super::grid::{format_hhmm, weekday_label};

/// Whether an interval is fixed busy time or allocated study time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalKind {
    /// User-declared unavailable time.
    Busy,
    /// Allocator-produced study block.
    Study,
}

impl IntervalKind {
    /// Lowercase name used in exports.
    pub fn as_str(&self) -> &'static str {
        match self {
            IntervalKind::Busy => "busy",
            IntervalKind::Study => "study",
        }
    }
}

/// A half-open interval `[start_min, end_min)` on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeInterval {
    /// Weekday index (0 = Monday).
    pub weekday: u8,
    /// Start minute-of-day (inclusive).
    pub start_min: u32,
    /// End minute-of-day (exclusive).
    pub end_min: u32,
    /// Busy reason, or the subject name for study blocks.
    pub label: String,
    /// Interval kind.
    pub kind: IntervalKind,
}

impl TimeInterval {
    /// Creates a busy interval.
    pub fn busy(weekday: u8, start_min: u32, end_min: u32, label: impl Into<String>) -> Self {
        Self {
            weekday,
            start_min,
            end_min,
            label: label.into(),
            kind: IntervalKind::Busy,
        }
    }

    /// Creates a study interval for a subject.
    pub fn study(weekday: u8, start_min: u32, end_min: u32, subject: impl Into<String>) -> Self {
        Self {
            weekday,
            start_min,
            end_min,
            label: subject.into(),
            kind: IntervalKind::Study,
        }
    }

    /// Length in minutes.
    #[inline]
    pub fn duration_min(&self) -> u32 {
        self.end_min.saturating_sub(self.start_min)
    }

    #[inline]
    pub fn is_busy(&self) -> bool {
        self.kind == IntervalKind::Busy
    }

    #[inline]
    pub fn is_study(&self) -> bool {
        self.kind == IntervalKind::Study
    }

    /// Whether two intervals share any minute. Touching intervals don't.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.weekday == other.weekday
            && self.start_min < other.end_min
            && other.start_min < self.end_min
    }

    /// `Mon 09:00-10:30` style display.
    pub fn display_range(&self) -> String {
        format!(
            "{} {}-{}",
            weekday_label(self.weekday),
            format_hhmm(self.start_min),
            format_hhmm(self.end_min)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_basics() {
        let b = TimeInterval::study(0, 540, 630, "Algebra");
        assert_eq!(b.duration_min(), 90);
        assert!(b.is_study());
        assert!(!b.is_busy());
        assert_eq!(b.display_range(), "Mon 09:00-10:30");
    }

    #[test]
    fn test_overlap_requires_same_weekday() {
        let a = TimeInterval::busy(1, 600, 660, "Lecture");
        let b = TimeInterval::study(1, 630, 690, "Algebra");
        let c = TimeInterval::study(2, 630, 690, "Algebra");
        let d = TimeInterval::study(1, 660, 720, "Algebra"); // touching

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(!a.overlaps(&d));
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&IntervalKind::Study).unwrap();
        assert_eq!(json, "\"study\"");
        assert_eq!(IntervalKind::Busy.as_str(), "busy");
    }
}
