use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::rejected;
use crate::models::price_alert::{AlertEvaluation, CreatePriceAlertRequest, PriceAlertResponse};
use crate::services::price_alerts;
use crate::AppState;

/// POST /api/users/{id}/alerts
pub async fn create_alert(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreatePriceAlertRequest>,
) -> Result<(StatusCode, Json<PriceAlertResponse>), ServiceError> {
    let new_alert = payload.validate().map_err(rejected)?;
    let alert = price_alerts::create_alert(&*state.db, user_id, new_alert).await?;

    Ok((StatusCode::CREATED, Json(PriceAlertResponse::from(alert))))
}

/// GET /api/users/{id}/alerts
pub async fn list_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<PriceAlertResponse>>, ServiceError> {
    let alerts = price_alerts::list_user_alerts(&*state.db, user_id).await?;
    Ok(Json(alerts.into_iter().map(PriceAlertResponse::from).collect()))
}

/// GET /api/users/{id}/alerts/evaluate
///
/// Every active alert of the user with the latest price in its currency
/// and whether the target has been reached.
pub async fn evaluate_alerts(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<AlertEvaluation>>, ServiceError> {
    info!(user_id = %user_id, "Evaluating price alerts");
    let evaluations = price_alerts::evaluate_alerts(&*state.db, user_id).await?;
    Ok(Json(evaluations))
}

/// DELETE /api/users/{id}/alerts/{alert_id}
pub async fn deactivate_alert(
    State(state): State<AppState>,
    Path((user_id, alert_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    price_alerts::deactivate_alert(&*state.db, user_id, alert_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
