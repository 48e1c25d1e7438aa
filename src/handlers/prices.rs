//! Price observation endpoints
//!
//! Observations are append-only: the only mutable field is `notes`.

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::{page_request, query_params, rejected};
use crate::models::pagination::{Page, PageQuery};
use crate::models::price_observation::{
    CreatePriceObservationRequest, PriceObservationResponse, PriceSearchQuery, PriceSortField,
    UpdateNotesRequest,
};
use crate::services::price_observations;
use crate::AppState;

/// POST /api/prices
///
/// # Response
/// - 201: Recorded observation
/// - 400: Negative price, more than two decimals, unknown currency, empty location
/// - 404: Item or store missing or inactive
pub async fn record_price(
    State(state): State<AppState>,
    Json(payload): Json<CreatePriceObservationRequest>,
) -> Result<(StatusCode, Json<PriceObservationResponse>), ServiceError> {
    info!(
        item_id = %payload.item_id,
        store_id = %payload.store_id,
        "Recording price observation"
    );

    let new_observation = payload.validate().map_err(rejected)?;
    let observation = price_observations::record_observation(&*state.db, new_observation).await?;

    Ok((StatusCode::CREATED, Json(PriceObservationResponse::from(observation))))
}

/// GET /api/prices
///
/// # Query Parameters
/// - `item_id`, `store_id`, `store_type`, `city`, `currency`, `status`
/// - `date_from`, `date_to` (inclusive, YYYY-MM-DD)
/// - `page` (0-based), `size`, `sort` (observationDate, price, createdAt), `direction`
///
/// All given filters are combined with AND.
pub async fn search_prices(
    State(state): State<AppState>,
    query: Result<Query<PriceSearchQuery>, QueryRejection>,
    paging: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<PriceObservationResponse>>, ServiceError> {
    let filter = query_params(query)?.validate().map_err(rejected)?;
    let page = page_request::<PriceSortField>(&state, &query_params(paging)?)?;

    info!(
        page = page.page,
        size = page.size,
        store_join = filter.needs_store_join(),
        "Price search request received"
    );

    let results = price_observations::find_by_filters(&*state.db, &filter, &page).await?;
    Ok(Json(results.map(PriceObservationResponse::from)))
}

/// GET /api/prices/{id}
pub async fn get_price(
    State(state): State<AppState>,
    Path(observation_id): Path<Uuid>,
) -> Result<Json<PriceObservationResponse>, ServiceError> {
    let observation = price_observations::get_observation(&*state.db, observation_id).await?;
    Ok(Json(PriceObservationResponse::from(observation)))
}

/// PATCH /api/prices/{id}
pub async fn update_price_notes(
    State(state): State<AppState>,
    Path(observation_id): Path<Uuid>,
    Json(payload): Json<UpdateNotesRequest>,
) -> Result<Json<PriceObservationResponse>, ServiceError> {
    let notes = payload.validate().map_err(rejected)?;
    let observation = price_observations::update_notes(&*state.db, observation_id, notes).await?;
    Ok(Json(PriceObservationResponse::from(observation)))
}

/// DELETE /api/prices/{id}
pub async fn deactivate_price(
    State(state): State<AppState>,
    Path(observation_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    info!(observation_id = %observation_id, "Deactivating price observation");
    price_observations::deactivate_observation(&*state.db, observation_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/items/{id}/prices/latest
///
/// The most recently recorded active observation of the item.
///
/// # Response
/// - 200: Latest observation
/// - 404: Unknown or inactive item, or no active observation
pub async fn get_latest_price(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<PriceObservationResponse>, ServiceError> {
    info!(item_id = %item_id, "Fetching latest active price");
    let observation = price_observations::find_latest_active_price(&*state.db, item_id).await?;
    Ok(Json(PriceObservationResponse::from(observation)))
}
