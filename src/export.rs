//! CSV rendering of a weekly plan.
//!
//! One row per interval in plan order:
//! `weekday,day,start,end,minutes,kind,label`.

use std::io::{self, Write};

use crate::models::grid::{format_hhmm, weekday_label};
use crate::models::{TimeInterval, WeeklyPlan};

/// Header row written before the intervals.
pub const CSV_HEADER: &str = "weekday,day,start,end,minutes,kind,label";

/// Writes a plan as CSV.
pub fn write_csv<W: Write>(plan: &WeeklyPlan, mut out: W) -> io::Result<()> {
    writeln!(out, "{CSV_HEADER}")?;
    for interval in &plan.intervals {
        writeln!(out, "{}", csv_row(interval))?;
    }
    Ok(())
}

/// Renders a plan as a CSV string.
pub fn to_csv(plan: &WeeklyPlan) -> String {
    let mut text = String::with_capacity(CSV_HEADER.len() + 1 + plan.len() * 48);
    text.push_str(CSV_HEADER);
    text.push('\n');
    for interval in &plan.intervals {
        text.push_str(&csv_row(interval));
        text.push('\n');
    }
    text
}

fn csv_row(interval: &TimeInterval) -> String {
    format!(
        "{},{},{},{},{},{},{}",
        interval.weekday,
        weekday_label(interval.weekday),
        format_hhmm(interval.start_min),
        format_hhmm(interval.end_min),
        interval.duration_min(),
        interval.kind.as_str(),
        escape_field(&interval.label)
    )
}

/// Quotes a field containing a comma, quote, or line break.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
