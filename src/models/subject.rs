//! Subject model.
//!
//! A subject is something to study with a weekly time target and an
//! optional exam date after which no more study is planned for it.
//! Remaining demand is tracked by the allocator, never on the subject.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A subject (course) to allocate study time for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique name within a configuration; also the study block label.
    pub name: String,
    /// Target study hours per week (≥ 0).
    pub weekly_target_hours: f64,
    /// Exam date. Dates after it receive no study. `None` = no exam.
    #[serde(default)]
    pub exam_date: Option<NaiveDate>,
    /// Importance (higher = more important). Only used by urgency selection.
    #[serde(default = "default_priority")]
    pub priority: u8,
}

fn default_priority() -> u8 {
    1
}

impl Subject {
    /// Creates a subject with no exam and default priority.
    pub fn new(name: impl Into<String>, weekly_target_hours: f64) -> Self {
        Self {
            name: name.into(),
            weekly_target_hours,
            exam_date: None,
            priority: default_priority(),
        }
    }

    /// Sets the exam date.
    pub fn with_exam_date(mut self, exam_date: NaiveDate) -> Self {
        self.exam_date = Some(exam_date);
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    /// Whether study may be planned on `date`. The exam day itself counts.
    #[inline]
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.exam_date.map_or(true, |exam| date <= exam)
    }
}
