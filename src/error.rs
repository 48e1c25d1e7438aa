//! Service error type and its HTTP mapping
//!
//! Every service returns `ServiceError`. Handlers hand it straight back to
//! axum, which renders it through `IntoResponse`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DbErr;
use std::fmt::Display;
use thiserror::Error;
use tracing::error;

use crate::models::ErrorResponse;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Entity is absent or soft-deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        ServiceError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "NOT_FOUND",
            ServiceError::Validation(_) => "VALIDATION_FAILED",
            ServiceError::Conflict(_) => "CONFLICT",
            ServiceError::Database(_) => "DATABASE_ERROR",
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if let ServiceError::Database(ref e) = self {
            error!(error = %e, "Database error while handling request");
        }

        let body = Json(ErrorResponse {
            error: self.to_string(),
            code: Some(self.code().to_string()),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Item", "abc");
        assert_eq!(err.to_string(), "Item not found: abc");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.code(), "NOT_FOUND");
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ServiceError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::Conflict("dup".to_string()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::Database(DbErr::Custom("boom".to_string())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = ServiceError::validation("start_date must not be after end_date").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
