//! Built-in selection rules.
//!
//! # Categories
//!
//! - **Rotation**: `SharedCursor`, `StableRotation`
//! - **Priority**: `Urgency`
//!
//! All rules return an index from the eligible list they are given.

use chrono::NaiveDate;

use super::{SelectionContext, SelectionRule};
use crate::models::Subject;

// ======================== Rotation rules ========================

/// Shared modulo cursor.
///
/// One counter advances on every call, across all weekdays, and picks
/// `eligible[counter % eligible.len()]`. Because the modulus is the size
/// of the eligible set at call time, the effective order shifts whenever
/// that size changes.
#[derive(Debug, Clone, Default)]
pub struct SharedCursor {
    counter: usize,
}

impl SharedCursor {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SelectionRule for SharedCursor {
    fn name(&self) -> &'static str {
        "shared_cursor"
    }

    fn select(&mut self, eligible: &[usize], _context: &SelectionContext<'_>) -> Option<usize> {
        if eligible.is_empty() {
            return None;
        }
        let pick = eligible[self.counter % eligible.len()];
        self.counter = self.counter.wrapping_add(1);
        Some(pick)
    }
}

/// Rotation over the stable subject order.
///
/// Resumes after the last subject picked and takes the first eligible one,
/// skipping ineligible subjects without disturbing the order of the rest.
#[derive(Debug, Clone)]
pub struct StableRotation {
    next: usize,
    subject_count: usize,
}

impl StableRotation {
    pub fn new(subject_count: usize) -> Self {
        Self {
            next: 0,
            subject_count,
        }
    }
}

impl SelectionRule for StableRotation {
    fn name(&self) -> &'static str {
        "stable_rotation"
    }

    fn select(&mut self, eligible: &[usize], _context: &SelectionContext<'_>) -> Option<usize> {
        // Fall back to the largest index seen if the caller's subject count is stale.
        let n = self
            .subject_count
            .max(eligible.last().map_or(0, |&i| i + 1));
        for step in 0..n {
            let candidate = (self.next + step) % n;
            if eligible.binary_search(&candidate).is_ok() {
                self.next = (candidate + 1) % n;
                return Some(candidate);
            }
        }
        None
    }
}

// ======================== Priority rules ========================

/// Priority weighted by exam proximity.
///
/// `weight = max(priority, 1) × urgency` where urgency is
/// - 1.0 without an exam,
/// - 2.0 when the exam is on or before the reference date,
/// - `1 + min(1.5, 10 / days_to_exam)` otherwise.
///
/// The highest weight wins; ties go to the earlier subject. Stateless, so
/// one subject keeps winning until its demand runs out.
#[derive(Debug, Clone, Copy)]
pub struct Urgency;

impl Urgency {
    /// Weight of a subject as seen from `reference_date`.
    pub fn weight(subject: &Subject, reference_date: Option<NaiveDate>) -> f64 {
        let base = f64::from(subject.priority.max(1));
        base * exam_urgency(subject.exam_date, reference_date)
    }
}

fn exam_urgency(exam_date: Option<NaiveDate>, reference_date: Option<NaiveDate>) -> f64 {
    let (Some(exam), Some(today)) = (exam_date, reference_date) else {
        return 1.0;
    };
    let days_to_exam = (exam - today).num_days();
    if days_to_exam <= 0 {
        2.0
    } else {
        1.0 + (10.0 / days_to_exam as f64).min(1.5)
    }
}

impl SelectionRule for Urgency {
    fn name(&self) -> &'static str {
        "urgency"
    }

    fn select(&mut self, eligible: &[usize], context: &SelectionContext<'_>) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for &idx in eligible {
            let subject = context.subjects.get(idx)?;
            let weight = Self::weight(subject, context.reference_date);
            match best {
                Some((_, w)) if weight <= w => {}
                _ => best = Some((idx, weight)),
            }
        }
        best.map(|(idx, _)| idx)
    }
}
