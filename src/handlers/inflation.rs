use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::{query_params, rejected};
use crate::models::inflation::{InflationOutcome, InflationQuery};
use crate::services::inflation;
use crate::AppState;

/// GET /api/items/{id}/inflation
///
/// Price change of an item between the first and last active observation
/// in the window, for one currency.
///
/// # Query Parameters
/// - `currency`: EUR or USD (required)
/// - `start_date`, `end_date`: inclusive window, YYYY-MM-DD (required)
///
/// # Response
/// - 200: `{"status": "CALCULATED", ...}` or `{"status": "INSUFFICIENT_DATA", "message": ...}`
/// - 400: Missing or invalid parameters, start after end
/// - 404: Unknown or inactive item
pub async fn get_item_inflation(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    query: Result<Query<InflationQuery>, QueryRejection>,
) -> Result<Json<InflationOutcome>, ServiceError> {
    let query = query_params(query)?;
    info!(
        item_id = %item_id,
        currency = ?query.currency,
        start_date = ?query.start_date,
        end_date = ?query.end_date,
        "Inflation request received"
    );

    let window = query.validate().map_err(rejected)?;
    let outcome = inflation::compute_inflation(&*state.db, item_id, &window).await?;

    Ok(Json(outcome))
}
