#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone, Utc};

    use crate::models::{Coach, CoachId, NewCoach};
    use crate::services::reports::{
        monthly_report, monthly_work_type_counts, report_years, WorkTypeCount,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn coach(number: &str, offered: NaiveDate, work_types: &[&str]) -> Coach {
        Coach::register(
            CoachId::new(format!("coach-{}", number)),
            NewCoach {
                coach_number: number.to_string(),
                offered_date: offered,
                work_types: work_types.iter().map(|w| w.to_string()).collect(),
                notes: None,
            },
        )
        .unwrap()
    }

    fn march_april_fleet() -> Vec<Coach> {
        let mut completed = coach("C-3", date(2024, 3, 20), &["Wiring"]);
        completed
            .complete(Utc.with_ymd_and_hms(2024, 4, 2, 15, 0, 0).unwrap())
            .unwrap();
        vec![
            coach("C-1", date(2024, 3, 4), &["Overhaul"]),
            coach("C-2", date(2024, 3, 11), &["Overhaul", "Painting"]),
            completed,
        ]
    }

    #[test]
    fn test_march_counts_active_coaches_by_intake() {
        let counts = monthly_work_type_counts(&march_april_fleet(), 2024, 3);
        assert_eq!(
            counts,
            vec![WorkTypeCount::new("Overhaul", 2), WorkTypeCount::new("Painting", 1)]
        );
    }

    #[test]
    fn test_april_counts_completed_coach_by_completion() {
        let counts = monthly_work_type_counts(&march_april_fleet(), 2024, 4);
        assert_eq!(counts, vec![WorkTypeCount::new("Wiring", 1)]);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(monthly_work_type_counts(&[], 2024, 3).is_empty());
        assert!(monthly_work_type_counts(&march_april_fleet(), 2023, 3).is_empty());
    }

    #[test]
    fn test_out_of_range_month_selects_nothing() {
        assert!(monthly_work_type_counts(&march_april_fleet(), 2024, 0).is_empty());
        assert!(monthly_work_type_counts(&march_april_fleet(), 2024, 13).is_empty());
        let report = monthly_report(&march_april_fleet(), 2024, 13);
        assert_eq!(report.month_name, "");
        assert_eq!(report.coach_count, 0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let fleet = vec![
            coach("C-1", date(2024, 7, 1), &["Wheelset Replacement", "Head Stock Repair"]),
            coach("C-2", date(2024, 7, 2), &["Exterior Painting"]),
            coach("C-3", date(2024, 7, 3), &["Exterior Painting"]),
        ];
        let counts = monthly_work_type_counts(&fleet, 2024, 7);
        assert_eq!(
            counts,
            vec![
                WorkTypeCount::new("Exterior Painting", 2),
                WorkTypeCount::new("Wheelset Replacement", 1),
                WorkTypeCount::new("Head Stock Repair", 1),
            ]
        );
        assert_eq!(monthly_work_type_counts(&fleet, 2024, 7), counts);
    }

    #[test]
    fn test_monthly_report_header() {
        let report = monthly_report(&march_april_fleet(), 2024, 3);
        assert_eq!(report.month_name, "March");
        assert_eq!(report.coach_count, 2);
        assert_eq!(report.work_types.len(), 2);
    }

    #[test]
    fn test_report_years_include_completion_and_current_year() {
        let mut late = coach("C-9", date(2022, 12, 30), &["Overhaul"]);
        late.complete(Utc.with_ymd_and_hms(2023, 1, 5, 8, 0, 0).unwrap())
            .unwrap();
        let fleet = vec![late, coach("C-10", date(2024, 2, 1), &["Overhaul"])];

        assert_eq!(report_years(&fleet, date(2026, 10, 16)), vec![2026, 2024, 2023, 2022]);
        assert_eq!(report_years(&[], date(2026, 10, 16)), vec![2026]);
    }
}
