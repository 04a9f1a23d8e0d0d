//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        // Coaches
        .route(
            "/coaches",
            get(handlers::list_coaches).post(handlers::create_coach),
        )
        .route(
            "/coaches/{coach_id}",
            get(handlers::get_coach).delete(handlers::delete_coach),
        )
        .route("/coaches/{coach_id}/complete", post(handlers::complete_coach))
        .route("/coaches/{coach_id}/materials", post(handlers::record_materials))
        .route("/work-types", get(handlers::work_types))
        // Materials
        .route(
            "/materials",
            get(handlers::list_materials).post(handlers::create_material),
        )
        .route("/materials/low-stock", get(handlers::low_stock_materials))
        // Holidays
        .route(
            "/holidays",
            get(handlers::list_holidays).post(handlers::create_holiday),
        )
        .route("/holidays/{date}", delete(handlers::delete_holiday))
        // Reports
        .route("/reports/monthly", get(handlers::monthly_report))
        .route("/reports/years", get(handlers::report_years));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::FullRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo = Arc::new(LocalRepository::new()) as Arc<dyn FullRepository>;
        let _router = create_router(AppState::new(repo));
    }
}
