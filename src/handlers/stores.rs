use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::rejected;
use crate::models::store::{CreateStoreRequest, StoreResponse};
use crate::services::stores;
use crate::AppState;

/// POST /api/users/{id}/stores
pub async fn create_store(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateStoreRequest>,
) -> Result<(StatusCode, Json<StoreResponse>), ServiceError> {
    info!(user_id = %user_id, name = %payload.name, "Creating store");

    let new_store = payload.validate().map_err(rejected)?;
    let store = stores::create_store(&*state.db, user_id, new_store).await?;

    Ok((StatusCode::CREATED, Json(StoreResponse::from(store))))
}

/// GET /api/users/{id}/stores
pub async fn list_user_stores(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<StoreResponse>>, ServiceError> {
    let stores = stores::list_user_stores(&*state.db, user_id).await?;
    Ok(Json(stores.into_iter().map(StoreResponse::from).collect()))
}

/// GET /api/stores/{id}
pub async fn get_store(
    State(state): State<AppState>,
    Path(store_id): Path<Uuid>,
) -> Result<Json<StoreResponse>, ServiceError> {
    let store = stores::get_store(&*state.db, store_id).await?;
    Ok(Json(StoreResponse::from(store)))
}

/// DELETE /api/users/{id}/stores/{store_id}
pub async fn deactivate_store(
    State(state): State<AppState>,
    Path((user_id, store_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    info!(user_id = %user_id, store_id = %store_id, "Deactivating store");
    stores::deactivate_store(&*state.db, user_id, store_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
