//! Categories and the item <-> category assignment
//!
//! The many-to-many relation lives only in the `item_categories` join table;
//! both directions are answered by joining through it.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use tracing::info;
use uuid::Uuid;

use crate::entities::{
    categories, item_categories, items,
    prelude::{Categories, ItemCategories, Items},
    sea_orm_active_enums::Status,
};
use crate::error::ServiceError;
use crate::models::category::NewCategory;
use crate::services::directory;

pub async fn create_category(
    db: &DatabaseConnection,
    new: NewCategory,
) -> Result<categories::Model, ServiceError> {
    // Names are unique across all rows, inactive ones included
    let existing = Categories::find()
        .filter(Expr::expr(Func::lower(Expr::col(categories::Column::Name))).eq(new.name.to_lowercase()))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(ServiceError::Conflict(format!(
            "Category '{}' already exists",
            new.name
        )));
    }

    let now = Utc::now().fixed_offset();
    let category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(new.name),
        description: Set(new.description),
        status: Set(Status::Active),
        created_at: Set(now),
        updated_at: Set(now),
    };
    let saved = category.insert(db).await?;

    info!(category_id = %saved.id, name = %saved.name, "Created category");
    Ok(saved)
}

pub async fn list_active_categories(
    db: &DatabaseConnection,
) -> Result<Vec<categories::Model>, ServiceError> {
    Ok(Categories::find()
        .filter(categories::Column::Status.eq(Status::Active))
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await?)
}

pub async fn deactivate_category(
    db: &DatabaseConnection,
    category_id: Uuid,
) -> Result<(), ServiceError> {
    let existing = directory::find_active_category(db, category_id).await?;

    let mut active: categories::ActiveModel = existing.into();
    active.status = Set(Status::Inactive);
    active.updated_at = Set(Utc::now().fixed_offset());
    active.update(db).await?;

    info!(category_id = %category_id, "Deactivated category");
    Ok(())
}

/// Link an item to a category. Linking twice is a no-op.
pub async fn assign_category(
    db: &DatabaseConnection,
    item_id: Uuid,
    category_id: Uuid,
) -> Result<(), ServiceError> {
    directory::find_active_item(db, item_id).await?;
    directory::find_active_category(db, category_id).await?;

    let existing = ItemCategories::find_by_id((item_id, category_id)).one(db).await?;
    if existing.is_some() {
        return Ok(());
    }

    let link = item_categories::ActiveModel {
        item_id: Set(item_id),
        category_id: Set(category_id),
    };
    link.insert(db).await?;

    info!(item_id = %item_id, category_id = %category_id, "Assigned category to item");
    Ok(())
}

pub async fn unassign_category(
    db: &DatabaseConnection,
    item_id: Uuid,
    category_id: Uuid,
) -> Result<(), ServiceError> {
    let result = ItemCategories::delete_many()
        .filter(item_categories::Column::ItemId.eq(item_id))
        .filter(item_categories::Column::CategoryId.eq(category_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(ServiceError::not_found(
            "Category assignment",
            format!("{}/{}", item_id, category_id),
        ));
    }

    info!(item_id = %item_id, category_id = %category_id, "Removed category from item");
    Ok(())
}

/// Active categories the item belongs to
pub async fn categories_for_item(
    db: &DatabaseConnection,
    item_id: Uuid,
) -> Result<Vec<categories::Model>, ServiceError> {
    directory::find_active_item(db, item_id).await?;

    Ok(Categories::find()
        .join(JoinType::InnerJoin, categories::Relation::ItemCategories.def())
        .filter(item_categories::Column::ItemId.eq(item_id))
        .filter(categories::Column::Status.eq(Status::Active))
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await?)
}

/// Active items filed under the category
pub async fn items_in_category(
    db: &DatabaseConnection,
    category_id: Uuid,
) -> Result<Vec<items::Model>, ServiceError> {
    directory::find_active_category(db, category_id).await?;

    Ok(Items::find()
        .join(JoinType::InnerJoin, items::Relation::ItemCategories.def())
        .filter(item_categories::Column::CategoryId.eq(category_id))
        .filter(items::Column::Status.eq(Status::Active))
        .order_by_asc(items::Column::Name)
        .all(db)
        .await?)
}
