//! Holiday store port.
//!
//! The store holds at most one holiday per calendar day, so both operations
//! are idempotent.

use async_trait::async_trait;
use chrono::NaiveDate;

use super::error::RepositoryResult;
use crate::models::Holiday;

#[async_trait]
pub trait HolidayRepository: Send + Sync {
    /// List holidays sorted by date, oldest first.
    async fn list_holidays(&self) -> RepositoryResult<Vec<Holiday>>;

    /// Register `date` as a holiday.
    ///
    /// Returns the stored holiday and whether it was newly inserted. Adding an
    /// existing date returns the existing record unchanged.
    async fn add_holiday(&self, date: NaiveDate) -> RepositoryResult<(Holiday, bool)>;

    /// Remove the holiday on `date`. Returns `false` when there was none.
    async fn remove_holiday(&self, date: NaiveDate) -> RepositoryResult<bool>;
}
