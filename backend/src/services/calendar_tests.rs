#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use chrono::{Datelike, Duration, NaiveDate, TimeZone, Utc, Weekday};
    use proptest::prelude::*;

    use crate::models::start_of_day;
    use crate::services::calendar::{is_working_day, working_days_between, working_days_since};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn no_holidays() -> BTreeSet<NaiveDate> {
        BTreeSet::new()
    }

    #[test]
    fn test_future_intake_counts_zero() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 8, 0, 0).unwrap();
        assert_eq!(working_days_since(date(2024, 5, 7), &no_holidays(), now), 0);
        assert_eq!(working_days_since(date(2025, 1, 1), &no_holidays(), now), 0);
    }

    #[test]
    fn test_same_day_weekday_counts_one() {
        // 2024-05-06 is a Monday
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 23, 59, 0).unwrap();
        assert_eq!(working_days_since(date(2024, 5, 6), &no_holidays(), now), 1);
    }

    #[test]
    fn test_same_day_sunday_counts_zero() {
        let now = Utc.with_ymd_and_hms(2024, 5, 12, 10, 0, 0).unwrap();
        assert_eq!(date(2024, 5, 12).weekday(), Weekday::Sun);
        assert_eq!(working_days_since(date(2024, 5, 12), &no_holidays(), now), 0);
    }

    #[test]
    fn test_same_day_holiday_counts_zero() {
        let now = Utc.with_ymd_and_hms(2024, 5, 6, 10, 0, 0).unwrap();
        let holidays = BTreeSet::from([date(2024, 5, 6)]);
        assert_eq!(working_days_since(date(2024, 5, 6), &holidays, now), 0);
    }

    #[test]
    fn test_eight_day_window_skips_one_sunday() {
        // Monday 2024-05-06 through Monday 2024-05-13, Sunday 05-12 excluded
        let now = Utc.with_ymd_and_hms(2024, 5, 13, 7, 15, 0).unwrap();
        assert_eq!(working_days_since(date(2024, 5, 6), &no_holidays(), now), 7);
    }

    #[test]
    fn test_time_of_day_on_reference_is_ignored() {
        let intake = date(2024, 5, 6);
        let midnight = start_of_day(date(2024, 5, 8));
        let late = Utc.with_ymd_and_hms(2024, 5, 8, 23, 59, 59).unwrap();
        assert_eq!(
            working_days_since(intake, &no_holidays(), midnight),
            working_days_since(intake, &no_holidays(), late)
        );
        assert_eq!(working_days_since(intake, &no_holidays(), late), 3);
    }

    #[test]
    fn test_holiday_on_reference_day_subtracts_one() {
        let intake = date(2024, 5, 6);
        let now = Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap();
        let without = working_days_since(intake, &no_holidays(), now);
        let with = working_days_since(intake, &BTreeSet::from([date(2024, 5, 10)]), now);
        assert_eq!(without - with, 1);
    }

    #[test]
    fn test_holiday_on_sunday_is_not_subtracted_twice() {
        let intake = date(2024, 5, 6);
        let now = Utc.with_ymd_and_hms(2024, 5, 12, 12, 0, 0).unwrap();
        let without = working_days_since(intake, &no_holidays(), now);
        let with = working_days_since(intake, &BTreeSet::from([date(2024, 5, 12)]), now);
        assert_eq!(without, with);
        assert_eq!(with, 6);
    }

    #[test]
    fn test_holidays_outside_window_are_ignored() {
        let holidays = BTreeSet::from([date(2024, 4, 30), date(2024, 6, 1)]);
        assert_eq!(
            working_days_between(date(2024, 5, 6), date(2024, 5, 11), &holidays),
            6
        );
    }

    #[test]
    fn test_is_working_day() {
        let holidays = BTreeSet::from([date(2024, 12, 25)]);
        assert!(is_working_day(date(2024, 12, 24), &holidays));
        assert!(!is_working_day(date(2024, 12, 25), &holidays));
        assert!(!is_working_day(date(2024, 12, 29), &holidays));
    }

    #[test]
    fn test_range_across_year_boundary() {
        // 2023-12-25 (Mon) .. 2024-01-07 (Sun): 14 days, two Sundays, two holidays on weekdays
        let holidays = BTreeSet::from([date(2023, 12, 25), date(2024, 1, 1)]);
        assert_eq!(
            working_days_between(date(2023, 12, 25), date(2024, 1, 7), &holidays),
            10
        );
    }

    proptest! {
        #[test]
        fn prop_week_window_matches_sunday_count(offset in 0i64..3650) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let end = start + Duration::days(7);
            let sundays = start
                .iter_days()
                .take(8)
                .filter(|d| d.weekday() == Weekday::Sun)
                .count();
            prop_assert_eq!(working_days_between(start, end, &no_holidays()), 8 - sundays);
        }

        #[test]
        fn prop_reversed_range_is_zero(offset in 0i64..3650, gap in 1i64..400) {
            let end = date(2020, 1, 1) + Duration::days(offset);
            let start = end + Duration::days(gap);
            prop_assert_eq!(working_days_between(start, end, &no_holidays()), 0);
        }

        #[test]
        fn prop_count_never_exceeds_span(offset in 0i64..3650, span in 0i64..120) {
            let start = date(2020, 1, 1) + Duration::days(offset);
            let end = start + Duration::days(span);
            let count = working_days_between(start, end, &no_holidays());
            prop_assert!(count <= (span + 1) as usize);
        }
    }
}
