use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::rejected;
use crate::models::inflation::{GenerateReportRequest, GenerateReportResponse, InflationReportResponse};
use crate::services::inflation_reports;
use crate::AppState;

/// POST /api/users/{id}/inflation-reports
///
/// # Response
/// - 201: Calculated and stored; `report` holds the saved row
/// - 200: Insufficient data; nothing stored, `report` is omitted
/// - 400: Missing or invalid window
/// - 404: Unknown user or item
pub async fn generate_report(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<GenerateReportRequest>,
) -> Result<(StatusCode, Json<GenerateReportResponse>), ServiceError> {
    info!(user_id = %user_id, item_id = %payload.item_id, "Generating inflation report");

    let window = payload.validate().map_err(rejected)?;
    let response =
        inflation_reports::generate_report(&*state.db, user_id, payload.item_id, &window).await?;

    let status = if response.report.is_some() {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(response)))
}

/// GET /api/users/{id}/inflation-reports
pub async fn list_reports(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<InflationReportResponse>>, ServiceError> {
    let reports = inflation_reports::list_user_reports(&*state.db, user_id).await?;
    Ok(Json(reports.into_iter().map(InflationReportResponse::from).collect()))
}

/// GET /api/inflation-reports/{id}
pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> Result<Json<InflationReportResponse>, ServiceError> {
    let report = inflation_reports::get_report(&*state.db, report_id).await?;
    Ok(Json(InflationReportResponse::from(report)))
}
