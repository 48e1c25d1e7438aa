//! Shopping lists and their entries
//!
//! Entries are never hard-deleted; removing one deactivates it. Deactivating
//! a list deactivates all of its entries in the same transaction.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::entities::{
    prelude::{ShoppingListItems, ShoppingLists},
    sea_orm_active_enums::Status,
    shopping_list_items, shopping_lists,
};
use crate::error::ServiceError;
use crate::services::directory;

pub async fn create_list(
    db: &DatabaseConnection,
    user_id: Uuid,
    name: String,
) -> Result<shopping_lists::Model, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    let now = Utc::now().fixed_offset();
    let list = shopping_lists::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(user_id),
        name: Set(name),
        status: Set(Status::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = list.insert(db).await?;

    info!(list_id = %saved.id, user_id = %user_id, "Created shopping list");
    Ok(saved)
}

async fn active_entries(
    db: &DatabaseConnection,
    list_id: Uuid,
) -> Result<Vec<shopping_list_items::Model>, ServiceError> {
    Ok(ShoppingListItems::find()
        .filter(shopping_list_items::Column::ShoppingListId.eq(list_id))
        .filter(shopping_list_items::Column::Status.eq(Status::Active))
        .order_by_asc(shopping_list_items::Column::CreatedAt)
        .order_by_asc(shopping_list_items::Column::Id)
        .all(db)
        .await?)
}

/// The list together with its active entries
pub async fn get_list(
    db: &DatabaseConnection,
    list_id: Uuid,
) -> Result<(shopping_lists::Model, Vec<shopping_list_items::Model>), ServiceError> {
    let list = directory::find_active_shopping_list(db, list_id).await?;
    let entries = active_entries(db, list_id).await?;
    Ok((list, entries))
}

pub async fn list_user_lists(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<shopping_lists::Model>, ServiceError> {
    directory::find_active_user(db, user_id).await?;

    Ok(ShoppingLists::find()
        .filter(shopping_lists::Column::UserId.eq(user_id))
        .filter(shopping_lists::Column::Status.eq(Status::Active))
        .order_by_desc(shopping_lists::Column::CreatedAt)
        .all(db)
        .await?)
}

pub async fn add_entry(
    db: &DatabaseConnection,
    list_id: Uuid,
    item_id: Uuid,
    quantity: Decimal,
) -> Result<shopping_list_items::Model, ServiceError> {
    directory::find_active_shopping_list(db, list_id).await?;
    directory::find_active_item(db, item_id).await?;

    let now = Utc::now().fixed_offset();
    let entry = shopping_list_items::ActiveModel {
        id: Set(Uuid::new_v4()),
        shopping_list_id: Set(list_id),
        item_id: Set(item_id),
        quantity: Set(quantity),
        is_checked: Set(false),
        status: Set(Status::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = entry.insert(db).await?;

    debug!(list_id = %list_id, entry_id = %saved.id, item_id = %item_id, "Added entry to shopping list");
    Ok(saved)
}

async fn find_active_entry(
    db: &DatabaseConnection,
    list_id: Uuid,
    entry_id: Uuid,
) -> Result<shopping_list_items::Model, ServiceError> {
    ShoppingListItems::find_by_id(entry_id)
        .filter(shopping_list_items::Column::ShoppingListId.eq(list_id))
        .filter(shopping_list_items::Column::Status.eq(Status::Active))
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Shopping list entry", entry_id))
}

pub async fn set_entry_checked(
    db: &DatabaseConnection,
    list_id: Uuid,
    entry_id: Uuid,
    checked: bool,
) -> Result<shopping_list_items::Model, ServiceError> {
    directory::find_active_shopping_list(db, list_id).await?;
    let entry = find_active_entry(db, list_id, entry_id).await?;
    if entry.is_checked == checked {
        return Ok(entry);
    }

    let mut active: shopping_list_items::ActiveModel = entry.into();
    active.is_checked = Set(checked);
    active.updated_at = Set(Utc::now().fixed_offset());
    Ok(active.update(db).await?)
}

pub async fn remove_entry(
    db: &DatabaseConnection,
    list_id: Uuid,
    entry_id: Uuid,
) -> Result<(), ServiceError> {
    directory::find_active_shopping_list(db, list_id).await?;
    let entry = find_active_entry(db, list_id, entry_id).await?;

    let mut active: shopping_list_items::ActiveModel = entry.into();
    active.status = Set(Status::Inactive);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await?;

    debug!(list_id = %list_id, entry_id = %entry_id, "Removed entry from shopping list");
    Ok(())
}

pub async fn deactivate_list(db: &DatabaseConnection, list_id: Uuid) -> Result<(), ServiceError> {
    let txn = db.begin().await?;

    let list = directory::find_active_shopping_list(&txn, list_id).await?;
    let now = Utc::now().fixed_offset();

    let entries = ShoppingListItems::update_many()
        .col_expr(shopping_list_items::Column::Status, Expr::value(Status::Inactive))
        .col_expr(shopping_list_items::Column::UpdatedAt, Expr::value(now))
        .filter(shopping_list_items::Column::ShoppingListId.eq(list_id))
        .filter(shopping_list_items::Column::Status.eq(Status::Active))
        .exec(&txn)
        .await?;

    let mut active: shopping_lists::ActiveModel = list.into();
    active.status = Set(Status::Inactive);
    active.updated_at = Set(now);
    active.update(&txn).await?;

    txn.commit().await.map_err(|e| {
        warn!(list_id = %list_id, error = %e, "Failed to commit shopping list deactivation");
        ServiceError::Database(e)
    })?;

    info!(
        list_id = %list_id,
        entries = entries.rows_affected,
        "Deactivated shopping list"
    );
    Ok(())
}
