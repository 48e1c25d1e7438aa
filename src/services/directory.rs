//! Active-entity lookups shared by the services
//!
//! Every lookup treats an inactive row exactly like a missing one.

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::entities::{
    categories, items,
    prelude::*,
    sea_orm_active_enums::Status,
    shopping_lists, stores, users,
};
use crate::error::ServiceError;

pub async fn find_active_user<C: ConnectionTrait>(
    db: &C,
    user_id: Uuid,
) -> Result<users::Model, ServiceError> {
    Users::find_by_id(user_id)
        .filter(users::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("User", user_id))
}

pub async fn find_active_item<C: ConnectionTrait>(
    db: &C,
    item_id: Uuid,
) -> Result<items::Model, ServiceError> {
    Items::find_by_id(item_id)
        .filter(items::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Item", item_id))
}

pub async fn find_active_store<C: ConnectionTrait>(
    db: &C,
    store_id: Uuid,
) -> Result<stores::Model, ServiceError> {
    Stores::find_by_id(store_id)
        .filter(stores::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Store", store_id))
}

pub async fn find_active_category<C: ConnectionTrait>(
    db: &C,
    category_id: Uuid,
) -> Result<categories::Model, ServiceError> {
    Categories::find_by_id(category_id)
        .filter(categories::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Category", category_id))
}

pub async fn find_active_shopping_list<C: ConnectionTrait>(
    db: &C,
    list_id: Uuid,
) -> Result<shopping_lists::Model, ServiceError> {
    ShoppingLists::find_by_id(list_id)
        .filter(shopping_lists::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Shopping list", list_id))
}
