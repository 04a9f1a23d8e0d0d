//! Data Transfer Objects for the HTTP API.
//!
//! Domain types already derive Serialize/Deserialize and are used directly as
//! bodies where their shape fits; the types here wrap listings and queries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use crate::db::services::{CoachDetails, CoachFilter};
pub use crate::models::{Coach, Holiday, Material, NewCoach, NewMaterial, Ownership};
pub use crate::services::{MonthlyReport, ProposedUsage, WorkTypeCount};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub store: String,
}

/// Query parameters for `GET /v1/coaches`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CoachListQuery {
    #[serde(default)]
    pub status: Option<CoachFilter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachListResponse {
    pub coaches: Vec<Coach>,
    pub total: usize,
}

/// Body of `POST /v1/coaches/{id}/materials`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordUsageRequest {
    #[serde(default)]
    pub entries: Vec<ProposedUsage>,
}

/// Query parameters for `GET /v1/materials`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MaterialListQuery {
    #[serde(default)]
    pub ownership: Option<Ownership>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialListResponse {
    pub materials: Vec<Material>,
    pub total: usize,
}

/// Body of `POST /v1/holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayListResponse {
    pub holidays: Vec<Holiday>,
    pub total: usize,
}

/// Query parameters for `GET /v1/reports/monthly`. Months are one-indexed.
#[derive(Debug, Clone, Deserialize)]
pub struct MonthlyReportQuery {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportYearsResponse {
    pub years: Vec<i32>,
}

/// Work types offered by the add-coach form. Free text outside the list is accepted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkTypesResponse {
    pub work_types: Vec<String>,
}
