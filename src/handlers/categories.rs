//! Category endpoints, including item assignment

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::rejected;
use crate::models::category::{CategoriesListResponse, CategoryResponse, CreateCategoryRequest};
use crate::models::item::ItemResponse;
use crate::services::categories;
use crate::AppState;

/// POST /api/categories
///
/// # Response
/// - 201: Created category
/// - 400: Empty or oversized name
/// - 409: A category with the same name (ignoring case) exists
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ServiceError> {
    info!(name = %payload.name, "Creating category");

    let new_category = payload.validate().map_err(rejected)?;
    let category = categories::create_category(&*state.db, new_category).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(category))))
}

/// GET /api/categories
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<CategoriesListResponse>, ServiceError> {
    let categories = categories::list_active_categories(&*state.db).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// DELETE /api/categories/{id}
pub async fn deactivate_category(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    info!(category_id = %category_id, "Deactivating category");
    categories::deactivate_category(&*state.db, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/categories/{id}/items
pub async fn list_category_items(
    State(state): State<AppState>,
    Path(category_id): Path<Uuid>,
) -> Result<Json<Vec<ItemResponse>>, ServiceError> {
    let items = categories::items_in_category(&*state.db, category_id).await?;
    Ok(Json(items.into_iter().map(ItemResponse::from).collect()))
}

/// GET /api/items/{id}/categories
pub async fn list_item_categories(
    State(state): State<AppState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<CategoriesListResponse>, ServiceError> {
    let categories = categories::categories_for_item(&*state.db, item_id).await?;
    Ok(Json(categories.into_iter().map(CategoryResponse::from).collect()))
}

/// PUT /api/items/{id}/categories/{category_id}
pub async fn assign_category(
    State(state): State<AppState>,
    Path((item_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    categories::assign_category(&*state.db, item_id, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/items/{id}/categories/{category_id}
pub async fn unassign_category(
    State(state): State<AppState>,
    Path((item_id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServiceError> {
    categories::unassign_category(&*state.db, item_id, category_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
