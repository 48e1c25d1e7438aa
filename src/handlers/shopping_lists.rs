//! Shopping list endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::rejected;
use crate::models::shopping_list::{
    AddShoppingListItemRequest, CheckItemRequest, CreateShoppingListRequest,
    ShoppingListEntryResponse, ShoppingListResponse,
};
use crate::services::shopping_lists;
use crate::AppState;

/// POST /api/users/{id}/shopping-lists
pub async fn create_list(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<CreateShoppingListRequest>,
) -> Result<(StatusCode, Json<ShoppingListResponse>), ServiceError> {
    let name = payload.validate().map_err(rejected)?;
    let list = shopping_lists::create_list(&*state.db, user_id, name).await?;

    Ok((StatusCode::CREATED, Json(ShoppingListResponse::new(list, Vec::new()))))
}

/// GET /api/users/{id}/shopping-lists
///
/// Lists without their entries; fetch a single list for those.
pub async fn list_user_lists(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<ShoppingListResponse>>, ServiceError> {
    let lists = shopping_lists::list_user_lists(&*state.db, user_id).await?;
    Ok(Json(
        lists
            .into_iter()
            .map(|list| ShoppingListResponse::new(list, Vec::new()))
            .collect(),
    ))
}

/// GET /api/shopping-lists/{id}
pub async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<Json<ShoppingListResponse>, ServiceError> {
    let (list, entries) = shopping_lists::get_list(&*state.db, list_id).await?;
    Ok(Json(ShoppingListResponse::new(list, entries)))
}

/// DELETE /api/shopping-lists/{id}
pub async fn deactivate_list(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    info!(list_id = %list_id, "Deactivating shopping list");
    shopping_lists::deactivate_list(&*state.db, list_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/shopping-lists/{id}/items
pub async fn add_entry(
    State(state): State<AppState>,
    Path(list_id): Path<Uuid>,
    Json(payload): Json<AddShoppingListItemRequest>,
) -> Result<(StatusCode, Json<ShoppingListEntryResponse>), ServiceError> {
    let (item_id, quantity) = payload.validate().map_err(rejected)?;
    let entry = shopping_lists::add_entry(&*state.db, list_id, item_id, quantity).await?;

    Ok((StatusCode::CREATED, Json(ShoppingListEntryResponse::from(entry))))
}

/// PUT /api/shopping-lists/{id}/items/{entry_id}/check
pub async fn set_entry_checked(
    State(state): State<AppState>,
    Path((list_id, entry_id)): Path<(Uuid, Uuid)>,
    Json(payload): Json<CheckItemRequest>,
) -> Result<Json<ShoppingListEntryResponse>, ServiceError> {
    let entry =
        shopping_lists::set_entry_checked(&*state.db, list_id, entry_id, payload.checked).await?;
    Ok(Json(ShoppingListEntryResponse::from(entry)))
}

/// DELETE /api/shopping-lists/{id}/items/{entry_id}
pub async fn remove_entry(
    State(state): State<AppState>,
    Path((list_id, entry_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    shopping_lists::remove_entry(&*state.db, list_id, entry_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
