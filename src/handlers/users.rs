//! User, preference, and store-ownership endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::handlers::rejected;
use crate::models::preferences::{PreferencesResponse, UpdatePreferencesRequest};
use crate::models::user::{RegisterUserRequest, UserResponse};
use crate::services::{user_preferences, users};
use crate::AppState;

/// POST /api/users
///
/// # Response
/// - 201: Registered user
/// - 400: Invalid email or display name
/// - 409: Email already registered
pub async fn register_user(
    State(state): State<AppState>,
    Json(payload): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ServiceError> {
    info!("User registration request received");

    let new_user = payload.validate().map_err(rejected)?;
    let user = users::register_user(&*state.db, new_user).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// GET /api/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<UserResponse>, ServiceError> {
    let user = users::get_user(&*state.db, user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// DELETE /api/users/{id}
pub async fn deactivate_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, ServiceError> {
    info!(user_id = %user_id, "Deactivating user");
    users::deactivate_user(&*state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/users/{id}/preferences
///
/// Users who never saved preferences get the defaults.
pub async fn get_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<PreferencesResponse>, ServiceError> {
    let preferences = user_preferences::get_preferences(&*state.db, user_id).await?;
    Ok(Json(preferences))
}

/// PUT /api/users/{id}/preferences
pub async fn update_preferences(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UpdatePreferencesRequest>,
) -> Result<Json<PreferencesResponse>, ServiceError> {
    info!(user_id = %user_id, "Updating user preferences");

    let update = payload.validate().map_err(rejected)?;
    let preferences = user_preferences::upsert_preferences(&*state.db, user_id, update).await?;

    Ok(Json(preferences))
}
