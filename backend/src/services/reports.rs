//! Monthly work-type reporting.
//!
//! Months are one-indexed throughout (1 = January). A coach is attributed to
//! the month of its completion when completed and to its intake month
//! otherwise; see [`Coach::report_date`].

use std::collections::{BTreeSet, HashMap};

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::Coach;

/// How many coaches in a month carried a given work type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkTypeCount {
    pub work_type: String,
    pub count: usize,
}

impl WorkTypeCount {
    pub fn new(work_type: impl Into<String>, count: usize) -> Self {
        Self {
            work_type: work_type.into(),
            count,
        }
    }
}

/// Report for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    /// English month name, empty for an out-of-range month.
    pub month_name: String,
    /// Coaches attributed to the month.
    pub coach_count: usize,
    pub work_types: Vec<WorkTypeCount>,
}

fn in_month(day: NaiveDate, year: i32, month: u32) -> bool {
    day.year() == year && day.month() == month
}

/// Count work types of the coaches attributed to `year`/`month`.
///
/// Each selected coach adds one to every work type it carries. The result is
/// sorted by descending count; equal counts keep first-seen order.
pub fn monthly_work_type_counts(coaches: &[Coach], year: i32, month: u32) -> Vec<WorkTypeCount> {
    let mut counts: Vec<WorkTypeCount> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for coach in coaches
        .iter()
        .filter(|c| in_month(c.report_date(), year, month))
    {
        for work_type in &coach.work_types {
            match index.get(work_type.as_str()) {
                Some(&slot) => counts[slot].count += 1,
                None => {
                    index.insert(work_type.as_str(), counts.len());
                    counts.push(WorkTypeCount::new(work_type.clone(), 1));
                }
            }
        }
    }

    // stable: ties stay in first-seen order
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Full monthly report with header fields.
pub fn monthly_report(coaches: &[Coach], year: i32, month: u32) -> MonthlyReport {
    let coach_count = coaches
        .iter()
        .filter(|c| in_month(c.report_date(), year, month))
        .count();
    let month_name = u8::try_from(month)
        .ok()
        .and_then(|m| Month::try_from(m).ok())
        .map(|m| m.name().to_string())
        .unwrap_or_default();

    MonthlyReport {
        year,
        month,
        month_name,
        coach_count,
        work_types: monthly_work_type_counts(coaches, year, month),
    }
}

/// Years worth offering in a report picker, newest first.
///
/// Every intake and completion year appears, plus the current year.
pub fn report_years(coaches: &[Coach], today: NaiveDate) -> Vec<i32> {
    let mut years: BTreeSet<i32> = coaches
        .iter()
        .flat_map(|c| {
            std::iter::once(c.offered_date.year())
                .chain(c.completion_date.map(|d| d.year()))
        })
        .collect();
    years.insert(today.year());
    years.into_iter().rev().collect()
}
