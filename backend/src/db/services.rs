//! High-level service layer.
//!
//! This module provides repository-agnostic operations that work with any
//! implementation of the repository traits. Each function loads what it needs
//! from storage, hands it to the pure computations in [`crate::services`] and
//! writes the result back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, tests)                    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs)                            │
//! │  - Validation and lifecycle rules                       │
//! │  - Read-merge-write with conflict retries               │
//! └───────────┬─────────────────────────────┬───────────────┘
//!             │                             │
//! ┌───────────▼─────────────┐   ┌───────────▼───────────────┐
//! │ Repository Traits       │   │ Domain services           │
//! │ (storage ports)         │   │ (calendar, ledger, ...)   │
//! └───────────┬─────────────┘   └───────────────────────────┘
//!     ┌───────┴────────┐
//! ┌───▼──────────┐ ┌───▼──────────┐
//! │ Local        │ │ File         │
//! │ (in-memory)  │ │ (JSON)       │
//! └──────────────┘ └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use coachtrack::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::demo();
//!     let coaches = services::list_coaches(&repo, services::CoachFilter::Active).await?;
//!     println!("Found {} active coaches", coaches.len());
//!     Ok(())
//! }
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use super::repo_config::UpdatePolicy;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use crate::models::{
    holiday_dates, Clock, Coach, CoachId, Holiday, Material, MaterialId, NewCoach, NewMaterial,
};
use crate::services::{
    self, merge_usage, resolve_usage, totals_by_month, totals_by_ownership, working_days_since,
    MonthlyReport, MonthlyUsage, OwnershipTotals, ProposedUsage, UsageLine,
};

// ==================== Health & Connection ====================

/// Check if the store is healthy.
pub async fn health_check<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Coach Operations ====================

/// Which coaches a listing returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoachFilter {
    #[default]
    All,
    Active,
    Completed,
}

/// List coaches.
///
/// Active and unfiltered listings are newest intake first; completed coaches
/// are listed most recently completed first.
pub async fn list_coaches<R: FullRepository + ?Sized>(
    repo: &R,
    filter: CoachFilter,
) -> RepositoryResult<Vec<Coach>> {
    let mut coaches = repo.list_coaches().await?;
    match filter {
        CoachFilter::All => {}
        CoachFilter::Active => coaches.retain(Coach::is_active),
        CoachFilter::Completed => coaches.retain(|c| !c.is_active()),
    }
    match filter {
        CoachFilter::Completed => coaches.sort_by(|a, b| b.completion_date.cmp(&a.completion_date)),
        _ => coaches.sort_by(|a, b| b.offered_date.cmp(&a.offered_date)),
    }
    debug!("Listed {} coaches ({:?})", coaches.len(), filter);
    Ok(coaches)
}

pub async fn get_coach<R: FullRepository + ?Sized>(
    repo: &R,
    coach_id: &CoachId,
) -> RepositoryResult<Coach> {
    repo.get_coach(coach_id).await
}

/// Validate and register a new active coach with an empty ledger.
pub async fn add_coach<R: FullRepository + ?Sized>(
    repo: &R,
    new: NewCoach,
) -> RepositoryResult<Coach> {
    let coach = Coach::register(CoachId::generate(), new)?;
    let stored = repo.add_coach(&coach).await?;
    info!(
        "Registered coach {} ({}) offered on {}",
        stored.coach_number, stored.id, stored.offered_date
    );
    Ok(stored)
}

/// Mark a coach completed at the clock's current instant.
///
/// A coach that is already completed is rejected and keeps its original
/// completion date.
pub async fn complete_coach<R: FullRepository + ?Sized>(
    repo: &R,
    coach_id: &CoachId,
    clock: &dyn Clock,
    policy: &UpdatePolicy,
) -> RepositoryResult<Coach> {
    let now = clock.now();
    let stored = update_with_retry(repo, coach_id, policy, "complete_coach", |coach| {
        coach.complete(now).map_err(RepositoryError::from)
    })
    .await?;
    info!("Coach {} completed at {}", stored.id, now);
    Ok(stored)
}

/// Hard-delete an active coach.
pub async fn remove_coach<R: FullRepository + ?Sized>(
    repo: &R,
    coach_id: &CoachId,
) -> RepositoryResult<()> {
    repo.delete_coach(coach_id).await?;
    info!("Removed coach {}", coach_id);
    Ok(())
}

/// Merge a batch of proposed usage rows into a coach's ledger.
///
/// Incomplete rows are dropped by the merge. The update is retried on a
/// stale revision, re-merging against the fresh ledger each time, so
/// concurrent submissions are never lost.
pub async fn record_material_usage<R: FullRepository + ?Sized>(
    repo: &R,
    coach_id: &CoachId,
    proposed: &[ProposedUsage],
    policy: &UpdatePolicy,
) -> RepositoryResult<Coach> {
    let stored = update_with_retry(repo, coach_id, policy, "record_material_usage", |coach| {
        coach.materials = merge_usage(&coach.materials, proposed);
        Ok(())
    })
    .await?;
    info!(
        "Recorded {} usage rows on coach {} ({} ledger entries)",
        proposed.len(),
        stored.id,
        stored.materials.len()
    );
    Ok(stored)
}

/// Read-modify-write of one coach, retried on stale revisions.
async fn update_with_retry<R, F>(
    repo: &R,
    coach_id: &CoachId,
    policy: &UpdatePolicy,
    operation: &str,
    mut apply: F,
) -> RepositoryResult<Coach>
where
    R: FullRepository + ?Sized,
    F: FnMut(&mut Coach) -> RepositoryResult<()> + Send,
{
    let mut attempt = 0;
    loop {
        let mut coach = repo.get_coach(coach_id).await?;
        apply(&mut coach).map_err(|e| e.with_operation(operation))?;

        match repo.update_coach(&coach).await {
            Ok(stored) => return Ok(stored),
            Err(e) if e.is_stale_revision() && attempt < policy.max_retries => {
                attempt += 1;
                warn!(
                    "{}: coach {} changed concurrently, retrying ({}/{})",
                    operation, coach_id, attempt, policy.max_retries
                );
                if policy.retry_delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(policy.retry_delay_ms)).await;
                }
            }
            Err(e) => return Err(e.with_operation(operation)),
        }
    }
}

/// Everything the coach detail view shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachDetails {
    pub coach: Coach,
    /// Working days since intake, counted up to today.
    pub working_days: usize,
    pub usage: Vec<UsageLine>,
    pub ownership_totals: OwnershipTotals,
    pub monthly_usage: Vec<MonthlyUsage>,
}

pub async fn coach_details<R: FullRepository + ?Sized>(
    repo: &R,
    coach_id: &CoachId,
    clock: &dyn Clock,
) -> RepositoryResult<CoachDetails> {
    let coach = repo.get_coach(coach_id).await?;
    let holidays = repo.list_holidays().await?;
    let materials = repo.list_materials().await?;

    let working_days = working_days_since(
        coach.offered_date,
        &holiday_dates(&holidays),
        clock.now(),
    );
    let usage = resolve_usage(&coach.materials, &materials);
    let ownership_totals = totals_by_ownership(&coach.materials, &materials);
    let monthly_usage = totals_by_month(&coach.materials);

    Ok(CoachDetails {
        coach,
        working_days,
        usage,
        ownership_totals,
        monthly_usage,
    })
}

// ==================== Material Operations ====================

pub async fn list_materials<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Material>> {
    repo.list_materials().await
}

pub async fn get_material<R: FullRepository + ?Sized>(
    repo: &R,
    material_id: &MaterialId,
) -> RepositoryResult<Material> {
    repo.get_material(material_id).await
}

/// Validate and append a material to the catalogue.
pub async fn add_material<R: FullRepository + ?Sized>(
    repo: &R,
    new: NewMaterial,
) -> RepositoryResult<Material> {
    let material = Material::create(MaterialId::generate(), new)?;
    let stored = repo.add_material(&material).await?;
    info!(
        "Added material {} ({}, {})",
        stored.name, stored.material_code, stored.ownership
    );
    Ok(stored)
}

/// Materials whose stock is below their minimum level.
pub async fn low_stock_materials<R: FullRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Material>> {
    let materials = repo.list_materials().await?;
    let low = services::low_stock(&materials);
    if !low.is_empty() {
        warn!("{} materials are below their minimum stock level", low.len());
    }
    Ok(low)
}

// ==================== Holiday Operations ====================

/// All holidays, earliest first.
pub async fn list_holidays<R: FullRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<Holiday>> {
    repo.list_holidays().await
}

/// Add a holiday. Adding an existing date returns the stored holiday.
pub async fn add_holiday<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
) -> RepositoryResult<Holiday> {
    let (holiday, added) = repo.add_holiday(date).await?;
    if added {
        info!("Added holiday {}", date);
    } else {
        debug!("Holiday {} already present", date);
    }
    Ok(holiday)
}

/// Remove the holiday on `date`, returning whether one existed.
pub async fn remove_holiday<R: FullRepository + ?Sized>(
    repo: &R,
    date: NaiveDate,
) -> RepositoryResult<bool> {
    let removed = repo.remove_holiday(date).await?;
    if removed {
        info!("Removed holiday {}", date);
    }
    Ok(removed)
}

// ==================== Reports ====================

/// Work-type report for a one-indexed month.
pub async fn monthly_report<R: FullRepository + ?Sized>(
    repo: &R,
    year: i32,
    month: u32,
) -> RepositoryResult<MonthlyReport> {
    if !(1..=12).contains(&month) {
        return Err(RepositoryError::validation(format!(
            "month must be between 1 and 12, got {}",
            month
        )));
    }
    let coaches = repo.list_coaches().await?;
    Ok(services::monthly_report(&coaches, year, month))
}

/// Years available for reporting, newest first.
pub async fn report_years<R: FullRepository + ?Sized>(
    repo: &R,
    clock: &dyn Clock,
) -> RepositoryResult<Vec<i32>> {
    let coaches = repo.list_coaches().await?;
    Ok(services::report_years(&coaches, clock.today()))
}
