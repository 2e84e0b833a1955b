//! Selection context passed to subject selection rules.

use chrono::NaiveDate;

use crate::models::Subject;

/// State a rule may consult when picking the next subject.
///
/// Built once per weekday by the allocator.
#[derive(Debug, Clone, Copy)]
pub struct SelectionContext<'a> {
    /// All subjects in rotation order. Eligible indices refer to this slice.
    pub subjects: &'a [Subject],
    /// Weekday being filled (0 = Monday).
    pub weekday: u8,
    /// First horizon date falling on `weekday`, if any.
    pub reference_date: Option<NaiveDate>,
}

impl<'a> SelectionContext<'a> {
    /// Creates a context for a weekday.
    pub fn new(subjects: &'a [Subject], weekday: u8) -> Self {
        Self {
            subjects,
            weekday,
            reference_date: None,
        }
    }

    /// Sets the reference date.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = Some(date);
        self
    }
}
