//! Workshop holiday calendar entries.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::define_id_type;

define_id_type!(HolidayId, "hol");

/// A non-working calendar day registered in settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: HolidayId,
    pub date: NaiveDate,
}

impl Holiday {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: HolidayId::generate(),
            date,
        }
    }
}

/// Distinct holiday days, the shape the working-day calculator consumes.
pub fn holiday_dates<'a>(holidays: impl IntoIterator<Item = &'a Holiday>) -> BTreeSet<NaiveDate> {
    holidays.into_iter().map(|h| h.date).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holiday_dates_deduplicates_by_day() {
        let day = NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
        let holidays = vec![Holiday::new(day), Holiday::new(day)];
        let dates = holiday_dates(&holidays);
        assert_eq!(dates.len(), 1);
        assert!(dates.contains(&day));
    }
}
