//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::repository::RepositoryError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Resource not found
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Repository error
    Repository(RepositoryError),
}

fn repository_response(err: &RepositoryError) -> (StatusCode, ApiError) {
    let (status, code) = match err {
        RepositoryError::NotFound { .. } => (StatusCode::NOT_FOUND, "NOT_FOUND"),
        RepositoryError::ValidationError { .. } => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
        RepositoryError::Conflict { .. } => (StatusCode::CONFLICT, "CONFLICT"),
        RepositoryError::ConnectionError { .. } => {
            (StatusCode::SERVICE_UNAVAILABLE, "STORE_UNAVAILABLE")
        }
        RepositoryError::ConfigurationError { .. } | RepositoryError::StorageError { .. } => {
            (StatusCode::INTERNAL_SERVER_ERROR, "REPOSITORY_ERROR")
        }
    };

    let context = err.context();
    let mut body = ApiError::new(code, err.to_string());
    if let Some(details) = context.details.clone().or_else(|| context.entity_id.clone()) {
        body = body.with_details(details);
    }
    (status, body)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Repository(e) => {
                if matches!(e, RepositoryError::StorageError { .. }) {
                    tracing::error!("Request failed: {}", e);
                }
                repository_response(&e)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;
    use crate::models::{CoachId, DomainError};

    #[test]
    fn test_repository_errors_map_to_status() {
        let cases = [
            (RepositoryError::not_found("coach-1"), StatusCode::NOT_FOUND),
            (RepositoryError::validation("bad"), StatusCode::BAD_REQUEST),
            (
                RepositoryError::from(DomainError::AlreadyCompleted(CoachId::new("coach-1"))),
                StatusCode::CONFLICT,
            ),
            (
                RepositoryError::stale_revision("stale", ErrorContext::new("update_coach")),
                StatusCode::CONFLICT,
            ),
            (
                RepositoryError::storage_with_context("disk full", ErrorContext::new("persist")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_conflict_body_names_the_coach() {
        let err = RepositoryError::from(DomainError::NotRemovable(CoachId::new("coach-7")));
        let (_, body) = repository_response(&err);
        assert_eq!(body.code, "CONFLICT");
        assert_eq!(body.details.as_deref(), Some("coach-7"));
    }
}
