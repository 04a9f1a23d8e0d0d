//! Domain services: pure computations over already-loaded entities.
//!
//! Nothing in this module performs I/O or fails. Storage orchestration lives in
//! [`crate::db::services`], which loads entities and hands them to these functions.

pub mod calendar;
pub mod inventory;
pub mod ledger;
pub mod reports;

#[cfg(test)]
#[path = "calendar_tests.rs"]
mod calendar_tests;
#[cfg(test)]
#[path = "reports_tests.rs"]
mod reports_tests;

pub use calendar::{is_working_day, working_days_between, working_days_since};
pub use inventory::{low_stock, owned_by};
pub use ledger::{
    merge_usage, resolve_usage, totals_by_material, totals_by_month, totals_by_ownership,
    MaterialTotal, MonthlyUsage, OwnershipTotals, ProposedUsage, UsageLine, UNKNOWN_MATERIAL,
};
pub use reports::{monthly_report, monthly_work_type_counts, report_years, MonthlyReport, WorkTypeCount};
