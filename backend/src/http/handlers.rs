//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use chrono::NaiveDate;

use super::dto::{
    CoachDetails, CoachListQuery, CoachListResponse, HealthResponse, HolidayListResponse,
    HolidayRequest, MaterialListQuery, MaterialListResponse, MonthlyReport, MonthlyReportQuery,
    RecordUsageRequest, ReportYearsResponse, WorkTypesResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{
    Coach, CoachId, Holiday, Material, NewCoach, NewMaterial, WORK_TYPE_CATALOGUE,
};
use crate::services::owned_by;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Unwrap a JSON body, reporting malformed input as 400.
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

/// Unwrap a query string, reporting malformed parameters as 400.
fn query<T>(params: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    params
        .map(|Query(value)| value)
        .map_err(|e| AppError::BadRequest(e.body_text()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid date '{}', expected YYYY-MM-DD", raw)))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store: store_status,
    }))
}

// =============================================================================
// Coaches
// =============================================================================

/// GET /v1/coaches?status=active|completed
pub async fn list_coaches(
    State(state): State<AppState>,
    params: Result<Query<CoachListQuery>, QueryRejection>,
) -> HandlerResult<CoachListResponse> {
    let filter = query(params)?.status.unwrap_or_default();
    let coaches = db_services::list_coaches(state.repository.as_ref(), filter).await?;
    let total = coaches.len();
    Ok(Json(CoachListResponse { coaches, total }))
}

/// POST /v1/coaches
pub async fn create_coach(
    State(state): State<AppState>,
    payload: Result<Json<NewCoach>, JsonRejection>,
) -> Result<(StatusCode, Json<Coach>), AppError> {
    let new = body(payload)?;
    let coach = db_services::add_coach(state.repository.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(coach)))
}

/// GET /v1/coaches/{coach_id}
///
/// Coach with working days, resolved ledger lines and ownership totals.
pub async fn get_coach(
    State(state): State<AppState>,
    Path(coach_id): Path<String>,
) -> HandlerResult<CoachDetails> {
    let details = db_services::coach_details(
        state.repository.as_ref(),
        &CoachId::new(coach_id),
        state.clock.as_ref(),
    )
    .await?;
    Ok(Json(details))
}

/// GET /v1/work-types
pub async fn work_types() -> HandlerResult<WorkTypesResponse> {
    Ok(Json(WorkTypesResponse {
        work_types: WORK_TYPE_CATALOGUE.iter().map(|w| w.to_string()).collect(),
    }))
}

/// DELETE /v1/coaches/{coach_id}
pub async fn delete_coach(
    State(state): State<AppState>,
    Path(coach_id): Path<String>,
) -> Result<StatusCode, AppError> {
    db_services::remove_coach(state.repository.as_ref(), &CoachId::new(coach_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /v1/coaches/{coach_id}/complete
pub async fn complete_coach(
    State(state): State<AppState>,
    Path(coach_id): Path<String>,
) -> HandlerResult<Coach> {
    let coach = db_services::complete_coach(
        state.repository.as_ref(),
        &CoachId::new(coach_id),
        state.clock.as_ref(),
        &state.updates,
    )
    .await?;
    Ok(Json(coach))
}

/// POST /v1/coaches/{coach_id}/materials
pub async fn record_materials(
    State(state): State<AppState>,
    Path(coach_id): Path<String>,
    payload: Result<Json<RecordUsageRequest>, JsonRejection>,
) -> HandlerResult<Coach> {
    let request = body(payload)?;
    let coach = db_services::record_material_usage(
        state.repository.as_ref(),
        &CoachId::new(coach_id),
        &request.entries,
        &state.updates,
    )
    .await?;
    Ok(Json(coach))
}

// =============================================================================
// Materials
// =============================================================================

/// GET /v1/materials?ownership=Railway|SSWPI
pub async fn list_materials(
    State(state): State<AppState>,
    params: Result<Query<MaterialListQuery>, QueryRejection>,
) -> HandlerResult<MaterialListResponse> {
    let ownership = query(params)?.ownership;
    let mut materials = db_services::list_materials(state.repository.as_ref()).await?;
    if let Some(ownership) = ownership {
        materials = owned_by(&materials, ownership);
    }
    let total = materials.len();
    Ok(Json(MaterialListResponse { materials, total }))
}

/// POST /v1/materials
pub async fn create_material(
    State(state): State<AppState>,
    payload: Result<Json<NewMaterial>, JsonRejection>,
) -> Result<(StatusCode, Json<Material>), AppError> {
    let new = body(payload)?;
    let material = db_services::add_material(state.repository.as_ref(), new).await?;
    Ok((StatusCode::CREATED, Json(material)))
}

/// GET /v1/materials/low-stock
pub async fn low_stock_materials(
    State(state): State<AppState>,
) -> HandlerResult<MaterialListResponse> {
    let materials = db_services::low_stock_materials(state.repository.as_ref()).await?;
    let total = materials.len();
    Ok(Json(MaterialListResponse { materials, total }))
}

// =============================================================================
// Holidays
// =============================================================================

/// GET /v1/holidays
pub async fn list_holidays(State(state): State<AppState>) -> HandlerResult<HolidayListResponse> {
    let holidays = db_services::list_holidays(state.repository.as_ref()).await?;
    let total = holidays.len();
    Ok(Json(HolidayListResponse { holidays, total }))
}

/// POST /v1/holidays
pub async fn create_holiday(
    State(state): State<AppState>,
    payload: Result<Json<HolidayRequest>, JsonRejection>,
) -> HandlerResult<Holiday> {
    let request = body(payload)?;
    let holiday = db_services::add_holiday(state.repository.as_ref(), request.date).await?;
    Ok(Json(holiday))
}

/// DELETE /v1/holidays/{date}
pub async fn delete_holiday(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<StatusCode, AppError> {
    let date = parse_date(&date)?;
    if db_services::remove_holiday(state.repository.as_ref(), date).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("No holiday on {}", date)))
    }
}

// =============================================================================
// Reports
// =============================================================================

/// GET /v1/reports/monthly?year=&month=
pub async fn monthly_report(
    State(state): State<AppState>,
    params: Result<Query<MonthlyReportQuery>, QueryRejection>,
) -> HandlerResult<MonthlyReport> {
    let params = query(params)?;
    let report =
        db_services::monthly_report(state.repository.as_ref(), params.year, params.month).await?;
    Ok(Json(report))
}

/// GET /v1/reports/years
pub async fn report_years(State(state): State<AppState>) -> HandlerResult<ReportYearsResponse> {
    let years = db_services::report_years(state.repository.as_ref(), state.clock.as_ref()).await?;
    Ok(Json(ReportYearsResponse { years }))
}
