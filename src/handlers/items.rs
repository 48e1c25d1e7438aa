use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::{page_request, query_params, rejected};
use crate::models::item::{
    CreateItemRequest, FavoriteRequest, ItemListQuery, ItemResponse, ItemSortField,
    UpdateItemRequest,
};
use crate::models::pagination::{Page, PageQuery};
use crate::services::items;
use crate::AppState;

/// POST /api/items
pub async fn create_item(
    State(state): State<AppState>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ItemResponse>), ServiceError> {
    info!(name = %payload.name, "Creating item");

    let details = payload.validate().map_err(rejected)?;
    let item = items::create_item(&*state.db, details, payload.is_favorite).await?;

    Ok((StatusCode::CREATED, Json(ItemResponse::from(item))))
}

/// GET /api/items
///
/// # Query Parameters
/// - `search`: case-insensitive substring of the name
/// - `favorites_only`: only favorite items when true
/// - `page`, `size`, `sort` (name, createdAt), `direction`
pub async fn list_items(
    State(state): State<AppState>,
    query: Result<Query<ItemListQuery>, QueryRejection>,
    paging: Result<Query<PageQuery>, QueryRejection>,
) -> Result<Json<Page<ItemResponse>>, ServiceError> {
    let filter = query_params(query)?.validate().map_err(rejected)?;
    let page = page_request::<ItemSortField>(&state, &query_params(paging)?)?;

    let items = items::list_items(&*state.db, &filter, &page).await?;
    Ok(Json(items.map(ItemResponse::from)))
}

/// GET /api/items/{id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemResponse>, ServiceError> {
    let item = items::get_item(&*state.db, item_id).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// PUT /api/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ItemResponse>, ServiceError> {
    let details = payload.validate().map_err(rejected)?;
    let item = items::update_item(&*state.db, item_id, details).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// PUT /api/items/{id}/favorite
pub async fn set_favorite(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
    Json(payload): Json<FavoriteRequest>,
) -> Result<Json<ItemResponse>, ServiceError> {
    let item = items::set_favorite(&*state.db, item_id, payload.is_favorite).await?;
    Ok(Json(ItemResponse::from(item)))
}

/// DELETE /api/items/{id}
pub async fn deactivate_item(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    info!(item_id = %item_id, "Deactivating item");
    items::deactivate_item(&*state.db, item_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
