//! Greedy weekly-grid allocator.
//!
//! # Algorithm
//!
//! For each weekday touched by the horizon (ascending index):
//! 1. Skip the weekday if no subject is both active and still owed time.
//! 2. Walk a cursor from the window start in slot steps.
//! 3. Occupied minute at the cursor: move to the next slot boundary.
//! 4. Otherwise pick a subject with the selection rule, measure the free
//!    run at the cursor and size the block as
//!    `min(max_block, run, remaining_demand)`.
//! 5. Too short: move to the next slot boundary. Else place the block,
//!    mark it occupied, charge the subject and jump past the block.
//! 6. Stop at the grid end or once no subject is eligible.
//!
//! Single pass, no backtracking: the result is deterministic but not
//! optimal.
//!
//! # Complexity
//! O(w · m · s) where w = weekdays, m = window minutes, s = subjects.

use chrono::{Local, NaiveDate};
use log::{debug, error, info, trace};

use super::demand::{DemandTable, HorizonCalendar};
use super::ledger::OccupancyLedger;
use crate::dispatching::{SelectionContext, SelectionRule};
use crate::error::{PlanError, Result};
use crate::models::{DayWindow, PlannerConfig, TimeInterval, WeeklyPlan};
use crate::validation::validate_config;

/// Greedy round-robin study allocator.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use study_planner::models::{PlannerConfig, Subject};
/// use study_planner::scheduler::Allocator;
///
/// let config = PlannerConfig::new(vec![Subject::new("Algebra", 7.0)])
///     .with_horizon_days(1)
///     .with_block_bounds(60, 60)
///     .with_day_window(9 * 60, 11 * 60, 60);
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
///
/// let plan = Allocator::new().allocate(&config, monday).unwrap();
/// assert_eq!(plan.study_count(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Allocator {
    iteration_cap: Option<usize>,
}

impl Allocator {
    /// Creates an allocator with the default iteration cap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the per-weekday iteration cap.
    ///
    /// The default (window length in minutes + 1) can never be reached
    /// because every step advances the cursor by at least one minute.
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        self.iteration_cap = Some(cap);
        self
    }

    /// Allocates study blocks for the horizon starting at `start_date`.
    ///
    /// Returns busy intervals (input order) followed by study intervals
    /// (placement order). Fails without partial output on an invalid
    /// configuration or an internal invariant violation.
    pub fn allocate(&self, config: &PlannerConfig, start_date: NaiveDate) -> Result<WeeklyPlan> {
        validate_config(config).map_err(PlanError::InvalidConfig)?;

        let window = config.window();
        let calendar = HorizonCalendar::new(start_date, config.planning_horizon_days);
        let cap = self
            .iteration_cap
            .unwrap_or(window.span_minutes() as usize + 1);

        let mut run = AllocationRun {
            config,
            window,
            ledger: OccupancyLedger::from_busy(window, &config.busy_intervals),
            demand: DemandTable::estimate(&config.subjects, config.planning_horizon_days),
            rule: config.selection.build(config.subjects.len()),
            study: Vec::new(),
            iteration_cap: cap,
        };

        for weekday in calendar.weekdays() {
            run.fill_weekday(weekday, &calendar)?;
        }

        let plan = WeeklyPlan::from_parts(config.busy_intervals.clone(), run.study);
        info!(
            "Allocated {} study blocks ({} min) from {} over {} days; {} min unmet",
            plan.study_count(),
            plan.total_study_minutes(),
            start_date,
            config.planning_horizon_days,
            run.demand.total_remaining()
        );
        Ok(plan)
    }
}

/// Allocates with a fresh [`Allocator`].
pub fn allocate(config: &PlannerConfig, start_date: NaiveDate) -> Result<WeeklyPlan> {
    Allocator::new().allocate(config, start_date)
}

/// Allocates starting from today's local date.
pub fn allocate_from_today(config: &PlannerConfig) -> Result<WeeklyPlan> {
    allocate(config, Local::now().date_naive())
}

/// Mutable state of one allocation call.
struct AllocationRun<'a> {
    config: &'a PlannerConfig,
    window: DayWindow,
    ledger: OccupancyLedger,
    demand: DemandTable,
    rule: Box<dyn SelectionRule>,
    study: Vec<TimeInterval>,
    iteration_cap: usize,
}

impl<'a> AllocationRun<'a> {
    fn fill_weekday(&mut self, weekday: u8, calendar: &HorizonCalendar) -> Result<()> {
        let config = self.config;
        let subjects = &config.subjects;
        let active: Vec<bool> = subjects
            .iter()
            .map(|s| calendar.is_active_on_weekday(s, weekday))
            .collect();

        let initially_eligible = self.eligible(&active);
        if initially_eligible.is_empty() {
            debug!("Weekday {weekday}: no eligible subjects");
            return Ok(());
        }

        let mut context = SelectionContext::new(subjects, weekday);
        if let Some(date) = calendar.first_date_on(weekday) {
            context = context.with_reference_date(date);
        }

        let grid_end = self.window.grid_end();
        let mut cursor = self.window.start_min;
        let mut iterations = 0usize;
        let mut placed = 0usize;

        while cursor < grid_end {
            iterations += 1;
            if iterations > self.iteration_cap {
                error!(
                    "Weekday {weekday}: cursor walk exceeded {} iterations at minute {cursor}",
                    self.iteration_cap
                );
                return Err(PlanError::IterationCapExceeded {
                    weekday,
                    iterations: self.iteration_cap,
                });
            }

            if self.ledger.is_occupied(weekday, cursor) {
                cursor = self.window.next_slot_boundary(cursor);
                continue;
            }

            let eligible = self.eligible(&active);
            if eligible.is_empty() {
                break;
            }

            let subject_idx = match self.rule.select(&eligible, &context) {
                Some(idx) if eligible.binary_search(&idx).is_ok() => idx,
                other => {
                    error!(
                        "Weekday {weekday}: rule '{}' returned {other:?} for eligible {eligible:?}",
                        self.rule.name()
                    );
                    return Err(PlanError::SelectionFailed {
                        weekday,
                        rule: self.rule.name(),
                    });
                }
            };

            let run = self.ledger.free_run(weekday, cursor);
            let Some(block_len) = self.block_length(subject_idx, run) else {
                trace!(
                    "Weekday {weekday} @{cursor}: run {run} too short for '{}'",
                    subjects[subject_idx].name
                );
                cursor = self.window.next_slot_boundary(cursor);
                continue;
            };

            let end = cursor + block_len;
            self.ledger.mark(weekday, cursor, end);
            self.demand.consume(subject_idx, block_len);
            let block =
                TimeInterval::study(weekday, cursor, end, subjects[subject_idx].name.as_str());
            trace!("Placed '{}' at {}", block.label, block.display_range());
            self.study.push(block);
            placed += 1;
            cursor = end;
        }

        debug!(
            "Weekday {weekday}: {} eligible subjects, {placed} blocks placed in {iterations} steps",
            initially_eligible.len()
        );
        Ok(())
    }

    /// Ascending indices of subjects active today and still owed time.
    fn eligible(&self, active: &[bool]) -> Vec<usize> {
        active
            .iter()
            .enumerate()
            .filter(|&(idx, &is_active)| is_active && self.demand.has_remaining(idx))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Block length for a subject given the free run, or `None` to skip.
    fn block_length(&self, subject_idx: usize, run: u32) -> Option<u32> {
        let bounded = run.min(self.config.max_block_minutes);
        let remaining = u32::try_from(self.demand.remaining(subject_idx).max(0)).unwrap_or(u32::MAX);
        let block = bounded.min(remaining);

        let admissible = if self.config.allow_short_final_block {
            bounded >= self.config.min_block_minutes && block > 0
        } else {
            block >= self.config.min_block_minutes
        };
        admissible.then_some(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::SelectionPolicy;
    use crate::models::Subject;
    use crate::scheduler::demand::demand_minutes;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn monday() -> NaiveDate {
        date(2024, 1, 1)
    }

    fn labels(plan: &WeeklyPlan) -> Vec<&str> {
        plan.study().map(|i| i.label.as_str()).collect()
    }

    #[test]
    fn test_exam_before_start_yields_nothing() {
        let exam = monday().pred_opt().unwrap();
        let config = PlannerConfig::new(vec![Subject::new("History", 10.0).with_exam_date(exam)])
            .with_horizon_days(3)
            .with_block_bounds(60, 120)
            .with_day_window(540, 720, 60);

        let plan = allocate(&config, monday()).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_two_hours_per_day_until_demand_runs_out() {
        // 7h/week over 7 days = 420 min, 2h available each day
        let config = PlannerConfig::new(vec![Subject::new("Algebra", 7.0)])
            .with_horizon_days(7)
            .with_block_bounds(60, 120)
            .with_day_window(540, 660, 60);

        let plan = allocate(&config, monday()).unwrap();
        let blocks: Vec<(u8, u32, u32)> = plan
            .study()
            .map(|i| (i.weekday, i.start_min, i.end_min))
            .collect();
        assert_eq!(
            blocks,
            vec![(0, 540, 660), (1, 540, 660), (2, 540, 660), (3, 540, 600)]
        );
        assert_eq!(plan.minutes_for_subject("Algebra"), 420);
    }

    #[test]
    fn test_strict_minimum_skips_demand_clamped_block() {
        let config = PlannerConfig::new(vec![Subject::new("Algebra", 7.0)])
            .with_horizon_days(7)
            .with_block_bounds(90, 120)
            .with_day_window(540, 660, 60)
            .with_short_final_block(false);

        let plan = allocate(&config, monday()).unwrap();
        assert_eq!(plan.study_count(), 3);
        assert_eq!(plan.minutes_for_subject("Algebra"), 360);
        assert!(plan.study().all(|i| i.duration_min() >= 90));
    }

    #[test]
    fn test_short_final_block_when_demand_clamps() {
        // 10.5h/week over 1 day = 90 min; 60 min blocks
        let config = PlannerConfig::new(vec![Subject::new("Physics", 10.5)])
            .with_horizon_days(1)
            .with_block_bounds(60, 60)
            .with_day_window(540, 720, 60);

        let plan = allocate(&config, monday()).unwrap();
        let durations: Vec<u32> = plan.study().map(|i| i.duration_min()).collect();
        assert_eq!(durations, vec![60, 30]);

        let strict = allocate(&config.clone().with_short_final_block(false), monday()).unwrap();
        assert_eq!(strict.minutes_for_subject("Physics"), 60);
    }

    #[test]
    fn test_busy_time_is_avoided_and_listed_first() {
        let config = PlannerConfig::new(vec![Subject::new("Algebra", 70.0)])
            .with_horizon_days(1)
            .with_block_bounds(60, 120)
            .with_day_window(540, 720, 60)
            .with_busy(TimeInterval::busy(0, 600, 660, "Lecture"))
            .with_busy(TimeInterval::busy(4, 540, 600, "Gym"));

        let plan = allocate(&config, monday()).unwrap();
        assert_eq!(plan.intervals[0].label, "Lecture");
        assert_eq!(plan.intervals[1].label, "Gym");
        let study: Vec<(u32, u32)> = plan.study().map(|i| (i.start_min, i.end_min)).collect();
        assert_eq!(study, vec![(540, 600), (660, 720)]);
        assert!(plan.overlapping_pairs().is_empty());
    }

    #[test]
    fn test_partially_busy_slot_is_not_used() {
        let config = PlannerConfig::new(vec![Subject::new("Algebra", 70.0)])
            .with_horizon_days(1)
            .with_block_bounds(60, 120)
            .with_day_window(540, 720, 60)
            .with_busy(TimeInterval::busy(0, 570, 600, "Call"));

        let plan = allocate(&config, monday()).unwrap();
        let study: Vec<(u32, u32)> = plan.study().map(|i| (i.start_min, i.end_min)).collect();
        assert_eq!(study, vec![(600, 720)]);
    }

    fn competing_config(policy: SelectionPolicy) -> PlannerConfig {
        // Demand for one day: A 60, B 120, C 120
        PlannerConfig::new(vec![
            Subject::new("A", 7.0),
            Subject::new("B", 14.0),
            Subject::new("C", 14.0),
        ])
        .with_horizon_days(1)
        .with_block_bounds(60, 60)
        .with_day_window(540, 840, 60)
        .with_selection(policy)
    }

    #[test]
    fn test_stable_rotation_order() {
        let plan = allocate(&competing_config(SelectionPolicy::StableRotation), monday()).unwrap();
        assert_eq!(labels(&plan), vec!["A", "B", "C", "B", "C"]);
    }

    #[test]
    fn test_shared_cursor_order() {
        let plan = allocate(&competing_config(SelectionPolicy::SharedCursor), monday()).unwrap();
        assert_eq!(labels(&plan), vec!["A", "C", "B", "C", "B"]);
    }

    #[test]
    fn test_urgency_prefers_near_exam() {
        let config = PlannerConfig::new(vec![
            Subject::new("Relaxed", 7.0),
            Subject::new("Cramming", 7.0).with_exam_date(date(2024, 1, 6)),
        ])
        .with_horizon_days(1)
        .with_block_bounds(60, 60)
        .with_day_window(540, 660, 60)
        .with_selection(SelectionPolicy::Urgency);

        let plan = allocate(&config, monday()).unwrap();
        assert_eq!(labels(&plan), vec!["Cramming", "Relaxed"]);
    }

    #[test]
    fn test_exam_mid_horizon_excludes_later_weekdays() {
        let config = PlannerConfig::new(vec![
            Subject::new("Networks", 21.0).with_exam_date(date(2024, 1, 3)),
            Subject::new("Reading", 1.0),
        ])
        .with_horizon_days(7)
        .with_block_bounds(30, 60)
        .with_day_window(540, 720, 30);

        let plan = allocate(&config, monday()).unwrap();
        assert!(plan.study_for("Networks").all(|i| i.weekday <= 2));
        assert!(plan.study_for("Networks").count() > 0);
    }

    #[test]
    fn test_huge_horizon_with_expired_exams() {
        let config = PlannerConfig::new(vec![
            Subject::new("Logic", 5.0).with_exam_date(date(2023, 12, 31)),
            Subject::new("Optics", 5.0).with_exam_date(date(2023, 12, 31)),
        ])
        .with_horizon_days(20_000_000)
        .with_day_window(540, 600, 30);

        let plan = allocate(&config, monday()).unwrap();
        assert_eq!(plan.study_count(), 0);
    }

    #[test]
    fn test_huge_horizon_fills_every_weekday() {
        let config = PlannerConfig::new(vec![Subject::new("Calculus", 10.0)])
            .with_horizon_days(u32::MAX)
            .with_block_bounds(60, 60)
            .with_day_window(540, 600, 30);

        let plan = allocate(&config, monday()).unwrap();
        assert_eq!(plan.study_count(), 7);
        assert_eq!(plan.total_study_minutes(), 7 * 60);
    }

    #[test]
    fn test_invalid_config_fails_fast() {
        let config =
            PlannerConfig::new(vec![Subject::new("A", 3.0)]).with_block_bounds(120, 60);
        match allocate(&config, monday()) {
            Err(PlanError::InvalidConfig(errors)) => assert!(!errors.is_empty()),
            other => panic!("expected InvalidConfig, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_inputs_return_busy_only() {
        let busy = TimeInterval::busy(0, 600, 660, "Lecture");

        let no_subjects = PlannerConfig::new(Vec::new()).with_busy(busy.clone());
        assert_eq!(allocate(&no_subjects, monday()).unwrap().intervals, vec![busy.clone()]);

        let zero_horizon = PlannerConfig::new(vec![Subject::new("A", 5.0)])
            .with_horizon_days(0)
            .with_busy(busy.clone());
        assert_eq!(allocate(&zero_horizon, monday()).unwrap().intervals, vec![busy]);

        let zero_target = PlannerConfig::new(vec![Subject::new("A", 0.0)]);
        assert!(allocate(&zero_target, monday()).unwrap().is_empty());

        let all_busy = PlannerConfig::new(vec![Subject::new("A", 5.0)])
            .with_horizon_days(1)
            .with_busy(TimeInterval::busy(0, 0, 1440, "Trip"));
        assert_eq!(allocate(&all_busy, monday()).unwrap().study_count(), 0);
    }

    #[test]
    fn test_iteration_cap_is_fatal() {
        let config = PlannerConfig::new(vec![Subject::new("Algebra", 70.0)])
            .with_horizon_days(1)
            .with_block_bounds(60, 120)
            .with_day_window(540, 720, 60)
            .with_busy(TimeInterval::busy(0, 600, 660, "Lecture"));

        let err = Allocator::new()
            .with_iteration_cap(2)
            .allocate(&config, monday())
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::IterationCapExceeded { weekday: 0, .. }
        ));
        assert!(err.is_internal());
    }

    #[test]
    fn test_study_is_weekday_major_time_ascending() {
        let config = competing_config(SelectionPolicy::StableRotation).with_horizon_days(7);
        let plan = allocate(&config, monday()).unwrap();
        let keys: Vec<(u8, u32)> = plan.study().map(|i| (i.weekday, i.start_min)).collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn test_allocate_from_today_succeeds() {
        let config = PlannerConfig::new(vec![Subject::new("A", 3.0)]);
        let plan = allocate_from_today(&config).unwrap();
        assert!(plan.minutes_for_subject("A") as i64 <= demand_minutes(3.0, 7));
    }

    fn random_config(rng: &mut StdRng, start: NaiveDate) -> PlannerConfig {
        let subject_count = rng.random_range(1..=4);
        let subjects = (0..subject_count)
            .map(|i| {
                let mut s = Subject::new(format!("S{i}"), f64::from(rng.random_range(0..=40u32)) / 2.0)
                    .with_priority(rng.random_range(1..=5));
                if rng.random_bool(0.5) {
                    let offset = rng.random_range(-3i64..=20);
                    s = s.with_exam_date(start + chrono::Duration::days(offset));
                }
                s
            })
            .collect();

        let slot = [15, 30, 60][rng.random_range(0..3)];
        let day_start = rng.random_range(6..=10) * 60;
        let day_end = rng.random_range(14..=23) * 60;
        let min = [30, 45, 60][rng.random_range(0..3)];
        let max = min + [0, 30, 60, 90][rng.random_range(0..4)];
        let policy = [
            SelectionPolicy::SharedCursor,
            SelectionPolicy::StableRotation,
            SelectionPolicy::Urgency,
        ][rng.random_range(0..3)];

        let mut config = PlannerConfig::new(subjects)
            .with_horizon_days(rng.random_range(1..=21))
            .with_block_bounds(min, max)
            .with_day_window(day_start, day_end, slot)
            .with_selection(policy)
            .with_short_final_block(rng.random_bool(0.5));

        for b in 0..rng.random_range(0..=8) {
            let start_min = rng.random_range(0..276u32) * 5;
            let end_min = (start_min + rng.random_range(3..=36u32) * 5).min(1440);
            config = config.with_busy(TimeInterval::busy(
                rng.random_range(0..7),
                start_min,
                end_min,
                format!("busy{b}"),
            ));
        }
        config
    }

    #[test]
    fn test_random_configs_hold_invariants() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..200 {
            let start = monday() + chrono::Duration::days(rng.random_range(0..14));
            let config = random_config(&mut rng, start);
            let plan = allocate(&config, start).unwrap();
            let calendar = HorizonCalendar::new(start, config.planning_horizon_days);
            let grid_end = config.window().grid_end();

            assert!(plan.overlapping_pairs().is_empty(), "overlap in {config:?}");
            assert_eq!(plan.busy().count(), config.busy_intervals.len());

            for subject in &config.subjects {
                let demand = demand_minutes(subject.weekly_target_hours, config.planning_horizon_days);
                let allocated = i64::from(plan.minutes_for_subject(&subject.name));
                assert!(allocated <= demand, "{} over-allocated", subject.name);

                for block in plan.study_for(&subject.name) {
                    assert!(calendar.is_active_on_weekday(subject, block.weekday));
                    assert!(block.start_min >= config.day_start_min);
                    assert!(block.end_min <= grid_end);
                    assert!(block.duration_min() <= config.max_block_minutes);
                    if block.duration_min() < config.min_block_minutes {
                        assert!(config.allow_short_final_block);
                        assert_eq!(allocated, demand);
                    }
                }
            }

            assert_eq!(allocate(&config, start).unwrap(), plan);
        }
    }
}
