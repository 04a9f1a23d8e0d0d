//! Day-precision helpers and the injectable clock.
//!
//! Domain logic works on `chrono::NaiveDate` only. Timestamps enter the system
//! through the [`Clock`] and through stored completion moments, and are
//! truncated to their UTC calendar day with [`day_of`] before any comparison.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// Source of "now" for the calendar and the completion transition.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;

    /// Current UTC calendar day.
    fn today(&self) -> NaiveDate {
        day_of(self.now())
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at a given instant, for tests and reproducible reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }

    /// Clock frozen at noon UTC of `date`.
    pub fn on_date(date: NaiveDate) -> Self {
        let noon = NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN);
        Self(date.and_time(noon).and_utc())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Calendar day (UTC) of a timestamp.
pub fn day_of(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Midnight UTC at the start of `date`.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_of_ignores_time() {
        let late = Utc.with_ymd_and_hms(2024, 5, 6, 23, 59, 59).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 5, 6, 0, 0, 1).unwrap();
        assert_eq!(day_of(late), day_of(early));
        assert_eq!(day_of(late), NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
    }

    #[test]
    fn test_fixed_clock_on_date() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let clock = FixedClock::on_date(date);
        assert_eq!(clock.today(), date);
        assert_eq!(clock.now(), Utc.with_ymd_and_hms(2024, 2, 29, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_start_of_day_roundtrip() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        assert_eq!(day_of(start_of_day(date)), date);
    }

    #[test]
    fn test_system_clock_is_close_to_now() {
        let before = Utc::now();
        let now = SystemClock.now();
        assert!(now >= before);
    }
}
