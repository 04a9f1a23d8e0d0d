//! Working-day calculator.
//!
//! A working day is a calendar day that is neither a Sunday nor a registered
//! holiday. All arithmetic happens on `NaiveDate`; the reference instant is
//! truncated to its UTC day before counting.

use std::collections::BTreeSet;

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::models::day_of;

/// True when `day` is neither a Sunday nor in `holidays`.
pub fn is_working_day(day: NaiveDate, holidays: &BTreeSet<NaiveDate>) -> bool {
    day.weekday() != Weekday::Sun && !holidays.contains(&day)
}

/// Count working days in the closed interval `[start, end]`.
///
/// Returns `0` when `start` is after `end`.
pub fn working_days_between(
    start: NaiveDate,
    end: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
) -> usize {
    if start > end {
        return 0;
    }
    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_working_day(*day, holidays))
        .count()
}

/// Working days a coach has spent in the workshop, intake day and today included.
///
/// An intake date in the future yields `0`.
pub fn working_days_since(
    intake: NaiveDate,
    holidays: &BTreeSet<NaiveDate>,
    reference_now: DateTime<Utc>,
) -> usize {
    working_days_between(intake, day_of(reference_now), holidays)
}
