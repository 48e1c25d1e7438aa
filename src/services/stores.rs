//! Stores belong to the user who registered them

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::entities::{prelude::Stores, sea_orm_active_enums::Status, stores};
use crate::error::ServiceError;
use crate::models::store::NewStore;
use crate::services::directory;

pub async fn create_store(
    db: &DatabaseConnection,
    user_id: Uuid,
    new: NewStore,
) -> Result<stores::Model, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    let now = Utc::now().fixed_offset();
    let store = stores::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(new.name),
        store_type: Set(new.store_type),
        city: Set(new.city),
        address: Set(new.address),
        status: Set(Status::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = store.insert(db).await?;

    info!(
        store_id = %saved.id,
        user_id = %user_id,
        city = %saved.city,
        "Created store"
    );
    Ok(saved)
}

pub async fn get_store(db: &DatabaseConnection, store_id: Uuid) -> Result<stores::Model, ServiceError> {
    directory::find_active_store(db, store_id).await
}

pub async fn list_user_stores(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<stores::Model>, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    Ok(Stores::find()
        .filter(stores::Column::UserId.eq(user_id))
        .filter(stores::Column::Status.eq(Status::Active))
        .order_by_asc(stores::Column::Name)
        .all(db)
        .await?)
}

/// Deactivate a store owned by `user_id`. A store owned by someone else
/// is reported as missing.
pub async fn deactivate_store(
    db: &DatabaseConnection,
    user_id: Uuid,
    store_id: Uuid,
) -> Result<(), ServiceError> {
    let store = directory::find_active_store(db, store_id).await?;
    if store.user_id != user_id {
        warn!(store_id = %store_id, user_id = %user_id, "Store not owned by user");
        return Err(ServiceError::not_found("Store", store_id));
    }

    let mut active: stores::ActiveModel = store.into();
    active.status = Set(Status::Inactive);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await?;

    info!(store_id = %store_id, "Deactivated store");
    Ok(())
}
