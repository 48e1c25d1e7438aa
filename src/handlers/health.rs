use axum::{extract::State, Json};
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::error;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = match state.db.execute_unprepared("SELECT 1").await {
        Ok(_) => "up",
        Err(e) => {
            error!(error = %e, "Database health check failed");
            "down"
        }
    };

    Json(HealthResponse {
        status: "ok",
        database,
    })
}
